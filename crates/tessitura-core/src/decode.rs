use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::DecodeError;

/// A fully decoded, mono waveform at the decoder's native sample rate.
/// Samples are normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    /// Total duration in seconds: sample_count / sample_rate.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

fn setup_symphonia(path: &Path) -> Result<(Box<dyn FormatReader>, Box<dyn Decoder>), DecodeError> {
    let file = File::open(path).map_err(|e| DecodeError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }
    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(DecodeError::ProbeFormat)?;

    let format_reader = probed.format;

    let track = format_reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoCompatibleTrack)?;

    let codec_params = &track.codec_params;
    let dec_opts: DecoderOptions = Default::default();

    let decoder = symphonia::default::get_codecs()
        .make(codec_params, &dec_opts)
        .map_err(|e| DecodeError::CreateDecoder {
            codec: codec_params.codec,
            source: e,
        })?;

    Ok((format_reader, decoder))
}

/// Decode a whole audio file to a mono waveform. Multi-channel input is
/// averaged down to one channel. Corrupt packets mid-stream are skipped;
/// anything before the first decodable packet is a hard error.
pub fn load_waveform(path: &Path) -> Result<Waveform, DecodeError> {
    let (mut format_reader, mut decoder) = setup_symphonia(path)?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_rate: u32 = 0;

    loop {
        let packet = match format_reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(DecodeError::PacketRead(err)),
        };

        match decoder.decode(&packet) {
            Ok(audio_buffer) => {
                let spec = *audio_buffer.spec();
                let frames = audio_buffer.frames();
                let channels = spec.channels.count();
                if channels == 0 {
                    return Err(DecodeError::InvalidChannelCount);
                }
                if frames == 0 {
                    continue;
                }

                if sample_rate == 0 {
                    sample_rate = spec.rate;
                }

                let mut sample_buf = SampleBuffer::<f32>::new((frames * channels) as u64, spec);
                sample_buf.copy_interleaved_ref(audio_buffer);

                samples.reserve(frames);
                for frame in sample_buf.samples().chunks_exact(channels) {
                    let mono: f32 = frame.iter().sum::<f32>() / channels as f32;
                    samples.push(mono);
                }
            }
            // A corrupt packet is recoverable; resynchronize on the next one.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(err) => return Err(DecodeError::Decoder(err)),
        }
    }

    if sample_rate == 0 {
        return Err(DecodeError::InvalidSampleRate);
    }

    Ok(Waveform {
        samples,
        sample_rate,
    })
}
