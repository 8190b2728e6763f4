//! PPM から PNG への変換.
//!
//! 変換は `Encoder` を並べたチェーンで行う. 前の段が使えない, または失敗したときだけ
//! 次の段を試す.

use {
    crate::{
        basis::Image,
        config::Config,
        error::{Error, Result},
        image::read_ppm_file,
    },
    std::{path::Path, process::Command},
};


/// `EncodeJob` は 1 回の変換の入力と出力先を表す.
pub struct EncodeJob<'a> {
    /// 元の PPM ファイル.
    pub source: &'a Path,
    /// `source` を読み込んだ画像.
    pub image: &'a Image,
    pub output: &'a Path,
}

/// 変換チェーンの 1 段.
///
/// `Error::is_fallback` が真になるエラーを返すと次の段に進む.
pub trait Encoder {
    fn name(&self) -> &'static str;

    /// 出力が正しい PNG になるか. 生コピーだけが偽.
    fn produces_png(&self) -> bool {
        true
    }

    fn encode(&self, job: &EncodeJob<'_>) -> Result<()>;
}

/// `image` クレートの PNG エンコーダ.
pub struct PngCodec;

impl Encoder for PngCodec {
    fn name(&self) -> &'static str {
        "png codec"
    }

    #[cfg(feature = "png-codec")]
    fn encode(&self, job: &EncodeJob<'_>) -> Result<()> {
        ::image::save_buffer_with_format(
            job.output,
            &job.image.to_raw(),
            job.image.width(),
            job.image.height(),
            ::image::ColorType::Rgb8,
            ::image::ImageFormat::Png,
        )?;
        Ok(())
    }

    #[cfg(not(feature = "png-codec"))]
    fn encode(&self, _job: &EncodeJob<'_>) -> Result<()> {
        Err(Error::CodecUnavailable)
    }
}

/// 外部コマンドを `<tool> <source> <output>` として呼ぶ.
pub struct ExternalTool {
    pub program: String,
}

impl Encoder for ExternalTool {
    fn name(&self) -> &'static str {
        "external tool"
    }

    fn encode(&self, job: &EncodeJob<'_>) -> Result<()> {
        let status = Command::new(&self.program)
            .arg(job.source)
            .arg(job.output)
            .status()
            .map_err(|source| Error::ExternalToolUnavailable {
                tool: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ExternalToolFailed {
                tool: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// 元のバイト列をそのまま出力先にコピーする. 出力は PNG ではない.
pub struct RawCopy;

impl Encoder for RawCopy {
    fn name(&self) -> &'static str {
        "raw copy"
    }

    fn produces_png(&self) -> bool {
        false
    }

    fn encode(&self, job: &EncodeJob<'_>) -> Result<()> {
        std::fs::copy(job.source, job.output)?;
        log::warn!(
            "copied raw PPM bytes to {}; the file is NOT a valid PNG",
            job.output.display()
        );
        Ok(())
    }
}

/// `Conversion` は変換に成功した段を表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub encoder: &'static str,
    pub valid_png: bool,
}

pub struct Converter {
    chain: Vec<Box<dyn Encoder>>,
}

impl Converter {
    pub fn new(chain: Vec<Box<dyn Encoder>>) -> Self {
        Self { chain }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Box::new(PngCodec),
            Box::new(ExternalTool {
                program: config.convert_tool.clone(),
            }),
            Box::new(RawCopy),
        ])
    }

    /// 先頭の段から順に試し, 最初に成功した段を返す.
    pub fn run(&self, job: &EncodeJob<'_>) -> Result<Conversion> {
        let mut last = None;
        for encoder in &self.chain {
            match encoder.encode(job) {
                Ok(()) => {
                    log::info!(
                        "converted {} to {} ({})",
                        job.source.display(),
                        job.output.display(),
                        encoder.name()
                    );
                    return Ok(Conversion {
                        encoder: encoder.name(),
                        valid_png: encoder.produces_png(),
                    });
                }
                Err(e) if e.is_fallback() => {
                    log::warn!("{} unavailable: {}", encoder.name(), e);
                    last = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last.unwrap_or(Error::CodecUnavailable))
    }

    /// PPM を読み込んでから変換する. ヘッダやピクセルデータが壊れていれば何も書き出さない.
    pub fn convert(&self, source: &Path, output: &Path) -> Result<Conversion> {
        let (header, image) = read_ppm_file(source)?;
        log::debug!(
            "{}: {}x{} max {}",
            source.display(),
            header.width,
            header.height,
            header.max_color_value
        );
        self.run(&EncodeJob {
            source,
            image: &image,
            output,
        })
    }
}
