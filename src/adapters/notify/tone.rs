//! Alert tone shape: a short sine beep with an exponential fade-out

use std::time::Duration;

pub const ALERT_TONE_FREQUENCY_HZ: f64 = 800.0;
pub const ALERT_TONE_START_GAIN: f64 = 0.3;
pub const ALERT_TONE_END_GAIN: f64 = 0.01;
pub const ALERT_TONE_DURATION_MS: u64 = 500;
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

const WAV_HEADER_LEN: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    pub frequency_hz: f64,
    pub start_gain: f64,
    pub end_gain: f64,
    pub duration: Duration,
}

impl Default for ToneEnvelope {
    fn default() -> Self {
        Self {
            frequency_hz: ALERT_TONE_FREQUENCY_HZ,
            start_gain: ALERT_TONE_START_GAIN,
            end_gain: ALERT_TONE_END_GAIN,
            duration: Duration::from_millis(ALERT_TONE_DURATION_MS),
        }
    }
}

impl ToneEnvelope {
    /// Gain at `elapsed` into the tone, ramping exponentially from start to end
    /// gain; 0.0 once the tone is over
    pub fn gain_at(&self, elapsed: Duration) -> f64 {
        let total = self.duration.as_secs_f64();
        let t = elapsed.as_secs_f64();
        if total <= 0.0 || t > total {
            return 0.0;
        }
        self.start_gain * (self.end_gain / self.start_gain).powf(t / total)
    }

    /// Signed sample value at `elapsed`
    pub fn sample_at(&self, elapsed: Duration) -> f64 {
        let phase = 2.0 * std::f64::consts::PI * self.frequency_hz * elapsed.as_secs_f64();
        self.gain_at(elapsed) * phase.sin()
    }

    /// Mono 16-bit PCM for the whole tone
    pub fn render_pcm(&self, sample_rate: u32) -> Vec<i16> {
        let count = (self.duration.as_secs_f64() * sample_rate as f64).round() as usize;
        (0..count)
            .map(|i| {
                let elapsed = Duration::from_secs_f64(i as f64 / sample_rate as f64);
                let sample = self.sample_at(elapsed).clamp(-1.0, 1.0);
                (sample * i16::MAX as f64) as i16
            })
            .collect()
    }

    /// The tone as a complete mono 16-bit WAV file
    pub fn to_wav(&self, sample_rate: u32) -> Vec<u8> {
        encode_wav(&self.render_pcm(sample_rate), sample_rate)
    }
}

/// Canonical 44-byte RIFF header followed by little-endian samples
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * 2;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_envelope_endpoints() {
        let tone = ToneEnvelope::default();
        assert_relative_eq!(tone.gain_at(Duration::ZERO), 0.3, epsilon = 1e-12);
        assert_relative_eq!(tone.gain_at(tone.duration), 0.01, epsilon = 1e-12);
        assert_eq!(tone.gain_at(Duration::from_millis(501)), 0.0);
    }

    #[test]
    fn test_envelope_decays_monotonically() {
        let tone = ToneEnvelope::default();
        let mut previous = f64::MAX;
        for ms in (0..=500).step_by(50) {
            let gain = tone.gain_at(Duration::from_millis(ms));
            assert!(gain < previous);
            previous = gain;
        }
    }

    #[test]
    fn test_sample_bounded_by_gain() {
        let tone = ToneEnvelope::default();
        for us in (0..500_000).step_by(1_234) {
            let elapsed = Duration::from_micros(us);
            assert!(tone.sample_at(elapsed).abs() <= tone.gain_at(elapsed) + 1e-12);
        }
    }

    #[test]
    fn test_render_pcm_length_and_peak() {
        let tone = ToneEnvelope::default();
        let pcm = tone.render_pcm(8_000);
        assert_eq!(pcm.len(), 4_000);
        assert_eq!(pcm[0], 0);

        let peak = pcm.iter().map(|s| s.unsigned_abs()).max().unwrap();
        let ceiling = (0.3 * i16::MAX as f64) as u16;
        assert!(peak <= ceiling);
        assert!(peak > ceiling / 2, "tone should be audible, peak {}", peak);

        // Fade-out: the last 50 ms are much quieter than the first 50 ms
        let loudness = |window: &[i16]| window.iter().map(|s| s.unsigned_abs() as u64).sum::<u64>();
        assert!(loudness(&pcm[3_600..]) * 5 < loudness(&pcm[..400]));
    }

    #[test]
    fn test_wav_header() {
        let samples = [0i16, 1_000, -1_000];
        let wav = encode_wav(&samples, 8_000);

        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 8_000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 6);
        assert_eq!(i16::from_le_bytes([wav[46], wav[47]]), 1_000);
    }
}
