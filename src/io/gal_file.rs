//! Reader and writer for `.gal` galaxy files.
//!
//! A `.gal` file is a flat sequence of native-endian `f64` values, six per
//! particle, interleaved as `(x, y, mass, vx, vy, brightness)`. There is no
//! header; the particle count is supplied by the caller and checked against
//! the file size.
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info};

use crate::particles::ParticleSet;
use crate::utils::{GalsimError, GAL_FIELDS_PER_PARTICLE};

const RECORD_BYTES: usize = GAL_FIELDS_PER_PARTICLE * std::mem::size_of::<f64>();

/// Particle state plus the brightness column, which the physics never reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalData {
    pub particles: ParticleSet,
    pub brightness: Vec<f64>,
}

impl GalData {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Expected size in bytes of a file holding `n` particles, `None` if it does not fit in a `u64`.
pub fn expected_file_size(n: usize) -> Option<u64> {
    u64::try_from(n).ok()?.checked_mul(RECORD_BYTES as u64)
}

/// Reads exactly `n` particles from `path`.
///
/// # Errors
///
/// - `InputFile` if the file cannot be opened or read.
/// - `InputSize` if the file is not exactly `6 * n * 8` bytes long.
/// - `InvalidParameter` if `6 * n * 8` overflows a file size.
/// - `Allocation` if the columns cannot be reserved.
pub fn read_gal<P: AsRef<Path>>(path: P, n: usize) -> Result<GalData, GalsimError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| GalsimError::InputFile(format!("{}: {}", path.display(), e)))?;

    let actual = file
        .metadata()
        .map_err(|e| GalsimError::InputFile(format!("{}: {}", path.display(), e)))?
        .len();
    let expected = expected_file_size(n).ok_or_else(|| {
        GalsimError::InvalidParameter(format!("{} particles do not fit in a .gal file", n))
    })?;
    if actual != expected {
        return Err(GalsimError::InputSize { expected, actual });
    }

    let mut particles = ParticleSet::with_capacity(n)?;
    let mut brightness = Vec::new();
    brightness
        .try_reserve_exact(n)
        .map_err(|e| GalsimError::Allocation(format!("{} brightness values: {}", n, e)))?;

    let mut reader = BufReader::new(file);
    let mut record = [0u8; RECORD_BYTES];
    for i in 0..n {
        reader.read_exact(&mut record).map_err(|e| {
            GalsimError::InputFile(format!("{}: failed to read particle {}: {}", path.display(), i, e))
        })?;
        let [x, y, mass, vx, vy, b] = decode_record(&record);
        particles.push(x, y, mass, vx, vy);
        brightness.push(b);
    }

    debug!("Read {} particles from {}", n, path.display());
    Ok(GalData { particles, brightness })
}

/// Writes every particle of `data` to `path`, replacing any existing file.
///
/// # Errors
///
/// - `OutputFile` if the file cannot be created or written.
/// - `InvalidParameter` if the brightness column length differs from the particle count.
pub fn write_gal<P: AsRef<Path>>(path: P, data: &GalData) -> Result<(), GalsimError> {
    let path = path.as_ref();
    let particles = &data.particles;
    if data.brightness.len() != particles.len() {
        return Err(GalsimError::InvalidParameter(format!(
            "{} brightness values for {} particles",
            data.brightness.len(),
            particles.len()
        )));
    }

    let file = File::create(path)
        .map_err(|e| GalsimError::OutputFile(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    for i in 0..particles.len() {
        let record = encode_record([
            particles.x[i],
            particles.y[i],
            particles.mass[i],
            particles.vx[i],
            particles.vy[i],
            data.brightness[i],
        ]);
        writer.write_all(&record).map_err(|e| {
            GalsimError::OutputFile(format!("{}: failed to write particle {}: {}", path.display(), i, e))
        })?;
    }
    writer
        .flush()
        .map_err(|e| GalsimError::OutputFile(format!("{}: {}", path.display(), e)))?;

    info!("Wrote {} particles to {}", particles.len(), path.display());
    Ok(())
}

/// Largest distance between the positions of matching particles in `a` and `b`.
///
/// # Errors
///
/// Returns `InvalidParameter` if the sets have different lengths.
pub fn max_position_deviation(a: &ParticleSet, b: &ParticleSet) -> Result<f64, GalsimError> {
    if a.len() != b.len() {
        return Err(GalsimError::InvalidParameter(format!(
            "cannot compare {} particles with {}",
            a.len(),
            b.len()
        )));
    }
    Ok((0..a.len())
        .map(|i| {
            let dx = a.x[i] - b.x[i];
            let dy = a.y[i] - b.y[i];
            (dx * dx + dy * dy).sqrt()
        })
        .fold(0.0, f64::max))
}

fn decode_record(record: &[u8; RECORD_BYTES]) -> [f64; GAL_FIELDS_PER_PARTICLE] {
    let mut values = [0.0; GAL_FIELDS_PER_PARTICLE];
    for (value, bytes) in values.iter_mut().zip(record.chunks_exact(8)) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        *value = f64::from_ne_bytes(raw);
    }
    values
}

fn encode_record(values: [f64; GAL_FIELDS_PER_PARTICLE]) -> [u8; RECORD_BYTES] {
    let mut record = [0u8; RECORD_BYTES];
    for (bytes, value) in record.chunks_exact_mut(8).zip(values) {
        bytes.copy_from_slice(&value.to_ne_bytes());
    }
    record
}
