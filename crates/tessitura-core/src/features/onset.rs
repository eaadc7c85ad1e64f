use crate::features::mel::{MelFilterbank, mel_spectrogram, power_to_db};
use crate::stft::Stft;

/// Minimum spacing between reported onsets. Suppresses double triggers
/// on a single transient.
const MIN_ONSET_GAP_SECONDS: f32 = 0.03;
/// Adaptive threshold: envelope mean plus this many standard deviations.
const THRESHOLD_FACTOR: f32 = 1.5;

/// Spectral-flux onset strength envelope, one value per frame.
///
/// Half-wave rectified positive difference between successive log-mel
/// frames, averaged across bands. Frame 0 has no predecessor and reads
/// as zero.
pub fn onset_envelope(
    filterbank: &MelFilterbank,
    power_frames: &[Vec<f32>],
    log_floor: f32,
) -> Vec<f32> {
    let mut mel = mel_spectrogram(filterbank, power_frames);
    power_to_db(&mut mel, log_floor);

    let mut envelope = vec![0.0f32; mel.len()];
    for t in 1..mel.len() {
        let mut flux = 0.0f32;
        for (b, &cur) in mel[t].iter().enumerate() {
            let diff = cur - mel[t - 1][b];
            if diff > 0.0 {
                flux += diff;
            }
        }
        envelope[t] = flux / filterbank.n_mels() as f32;
    }
    envelope
}

/// Pick onset frames from the envelope: local maxima above an adaptive
/// threshold (mean + 1.5 * std), at least the minimum gap apart.
fn pick_peaks(envelope: &[f32], min_gap_frames: usize) -> Vec<usize> {
    if envelope.len() < 3 {
        return Vec::new();
    }

    let n = envelope.len() as f32;
    let mean = envelope.iter().sum::<f32>() / n;
    let variance = envelope.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / n;
    let threshold = mean + THRESHOLD_FACTOR * variance.sqrt();

    let mut peaks = Vec::new();
    let mut last_peak: Option<usize> = None;
    for t in 1..envelope.len() - 1 {
        if envelope[t] <= threshold {
            continue;
        }
        if envelope[t] < envelope[t - 1] || envelope[t] < envelope[t + 1] {
            continue;
        }
        if let Some(prev) = last_peak {
            if t - prev < min_gap_frames {
                continue;
            }
        }
        peaks.push(t);
        last_peak = Some(t);
    }
    peaks
}

/// Detect onset events and report them as timestamps in seconds,
/// truncated to the first `max_onsets`, chronological order preserved.
pub fn detect(
    stft: &Stft,
    filterbank: &MelFilterbank,
    power_frames: &[Vec<f32>],
    sample_rate: u32,
    log_floor: f32,
    max_onsets: usize,
) -> Vec<f32> {
    let envelope = onset_envelope(filterbank, power_frames, log_floor);

    let gap_seconds = stft.frame_time(1, sample_rate);
    let min_gap_frames = if gap_seconds > 0.0 {
        (MIN_ONSET_GAP_SECONDS / gap_seconds).ceil() as usize
    } else {
        1
    }
    .max(1);

    pick_peaks(&envelope, min_gap_frames)
        .into_iter()
        .take(max_onsets)
        .map(|frame| stft.frame_time(frame, sample_rate))
        .collect()
}
