#![allow(dead_code)]

use std::path::Path;

use anyhow::Result;

/// Write a 16-bit mono WAV.
pub fn write_wav(path: &Path, sample_rate: u32, samples: &[f32]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in samples {
        writer.write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

/// `<root>/<keyword>/clip_<i>.wav`, `per_class` clips of `len` samples each.
pub fn build_dataset(
    root: &Path,
    keywords: &[&str],
    per_class: usize,
    sample_rate: u32,
    len: usize,
    tone: bool,
) -> Result<()> {
    for (k, keyword) in keywords.iter().enumerate() {
        let dir = root.join(keyword);
        std::fs::create_dir_all(&dir)?;
        for i in 0..per_class {
            let samples: Vec<f32> = if tone {
                let freq = 300.0 * (k + 1) as f32 + 10.0 * i as f32;
                (0..len)
                    .map(|n| {
                        let t = n as f32 / sample_rate as f32;
                        0.4 * (2.0 * std::f32::consts::PI * freq * t).sin()
                    })
                    .collect()
            } else {
                vec![0.0; len]
            };
            write_wav(&dir.join(format!("clip_{i:02}.wav")), sample_rate, &samples)?;
        }
    }
    Ok(())
}
