/// Hz to HTK mel scale.
#[inline]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// HTK mel scale back to Hz.
#[inline]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank over the power spectrum bins, spanning
/// 0 Hz to Nyquist.
pub struct MelFilterbank {
    /// Per filter: first spectrum bin covered plus one weight per bin.
    filters: Vec<(usize, Vec<f32>)>,
}

impl MelFilterbank {
    pub fn new(n_mels: usize, n_fft: usize, sample_rate: u32) -> Self {
        let n_bins = n_fft / 2 + 1;
        let bin_hz = sample_rate as f32 / n_fft as f32;

        let mel_low = hz_to_mel(0.0);
        let mel_high = hz_to_mel(sample_rate as f32 / 2.0);

        // n_mels filters need n_mels + 2 equally spaced mel edge points.
        let edges: Vec<f32> = (0..n_mels + 2)
            .map(|i| mel_to_hz(mel_low + (mel_high - mel_low) * i as f32 / (n_mels + 1) as f32))
            .collect();

        let mut filters = Vec::with_capacity(n_mels);
        for f in 0..n_mels {
            let (start_hz, center_hz, end_hz) = (edges[f], edges[f + 1], edges[f + 2]);

            let start_bin = (start_hz / bin_hz).floor() as usize;
            let end_bin = ((end_hz / bin_hz).ceil() as usize).min(n_bins.saturating_sub(1));

            let mut weights = Vec::with_capacity(end_bin.saturating_sub(start_bin) + 1);
            for bin in start_bin..=end_bin {
                let freq = bin as f32 * bin_hz;
                let w = if freq < center_hz {
                    if (center_hz - start_hz) < f32::EPSILON {
                        1.0
                    } else {
                        (freq - start_hz) / (center_hz - start_hz)
                    }
                } else if (end_hz - center_hz) < f32::EPSILON {
                    1.0
                } else {
                    (end_hz - freq) / (end_hz - center_hz)
                };
                weights.push(w.max(0.0));
            }
            filters.push((start_bin, weights));
        }

        MelFilterbank { filters }
    }

    pub fn n_mels(&self) -> usize {
        self.filters.len()
    }

    /// Project one power-spectrum frame onto the mel bands.
    pub fn apply(&self, power_frame: &[f32]) -> Vec<f32> {
        self.filters
            .iter()
            .map(|(start, weights)| {
                let mut energy = 0.0f32;
                for (i, &w) in weights.iter().enumerate() {
                    if let Some(&p) = power_frame.get(start + i) {
                        energy += p * w;
                    }
                }
                energy
            })
            .collect()
    }
}

/// Mel-scaled power spectrogram, frame-major: one `n_mels` row per frame.
pub fn mel_spectrogram(filterbank: &MelFilterbank, power_frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
    power_frames.iter().map(|f| filterbank.apply(f)).collect()
}

/// Log compression of mel power, `10 * log10(max(p, floor))`.
///
/// The floor is what keeps all-zero bands finite; without it a silent
/// frame propagates -inf into the DCT. This is the single canonical
/// policy for the whole pipeline.
pub fn power_to_db(mel_frames: &mut [Vec<f32>], floor: f32) {
    for frame in mel_frames {
        for v in frame.iter_mut() {
            *v = 10.0 * v.max(floor).log10();
        }
    }
}
