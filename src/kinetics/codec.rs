use std::sync::OnceLock;

const MANTISSA_BITS: u32 = 6;
const MANTISSA_MASK: u8 = 0b0011_1111;

/// `2^MANTISSA_BITS`
const BASE: u16 = 1 << MANTISSA_BITS;

/// Largest frame count the codec can produce (byte 0xFF)
pub const MAX_FRAMES: u16 = 952;

/// Lookup table from compressed kinetic byte to approximate frame count.
///
/// The table is filled once on construction and never mutated, so a single
/// instance can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct KineticCodec {
    frames: [u16; 256],
}

impl KineticCodec {
    #[must_use]
    pub fn new() -> Self {
        let mut frames = [0u16; 256];
        for (byte, slot) in (0..=u8::MAX).zip(frames.iter_mut()) {
            *slot = decode_frame(byte);
        }
        Self { frames }
    }

    /// Process-wide instance, built on first use
    pub fn shared() -> &'static Self {
        static CODEC: OnceLock<KineticCodec> = OnceLock::new();
        CODEC.get_or_init(Self::new)
    }

    #[inline]
    #[must_use]
    pub fn decode(&self, byte: u8) -> u16 {
        self.frames[usize::from(byte)]
    }

    #[must_use]
    pub fn decode_all(&self, bytes: &[u8]) -> Vec<u16> {
        bytes.iter().map(|&b| self.decode(b)).collect()
    }
}

impl Default for KineticCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate the V1 codec: `64 * (2^e - 1) + 2^e * m`
fn decode_frame(byte: u8) -> u16 {
    let mantissa = u16::from(byte & MANTISSA_MASK);
    let exponent = u32::from(byte >> MANTISSA_BITS);
    let scale = 1u16 << exponent;
    BASE * (scale - 1) + scale * mantissa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_bounds() {
        let codec = KineticCodec::new();
        assert_eq!(codec.decode(0), 0);
        assert_eq!(codec.decode(255), MAX_FRAMES);
    }

    #[test]
    fn test_strictly_increasing() {
        let codec = KineticCodec::new();
        for byte in 0..u8::MAX {
            assert!(
                codec.decode(byte) < codec.decode(byte + 1),
                "decode({byte}) >= decode({})",
                byte + 1
            );
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        let codec = KineticCodec::new();
        assert_eq!(codec.decode(63), 63);
        assert_eq!(codec.decode(64), 64);
        assert_eq!(codec.decode(127), 190);
        assert_eq!(codec.decode(128), 192);
        assert_eq!(codec.decode(191), 444);
        assert_eq!(codec.decode(192), 448);
    }

    #[test]
    fn test_step_within_bucket() {
        let codec = KineticCodec::new();
        for exponent in 0u8..4 {
            let step = 1u16 << exponent;
            let first = exponent << 6;
            for byte in first..first + 63 {
                assert_eq!(
                    codec.decode(byte + 1) - codec.decode(byte),
                    step,
                    "byte {byte}"
                );
            }
        }
    }

    #[test]
    fn test_decode_all_and_shared() {
        let frames = KineticCodec::shared().decode_all(&[0, 1, 64, 255]);
        assert_eq!(frames, vec![0, 1, 64, 952]);
        assert!(std::ptr::eq(KineticCodec::shared(), KineticCodec::shared()));
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| KineticCodec::shared().decode(200)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 512);
        }
    }
}
