use {
    crate::{
        basis::Image,
        error::{Error, Result},
    },
    std::{
        fs::File,
        io::{BufRead, BufReader, Read, Write},
        path::Path,
    },
};


/// `PpmHeader` は P6 形式の PPM ファイルのヘッダを表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
    pub width: u32,
    pub height: u32,
    pub max_color_value: u16,
}

impl PpmHeader {
    /// ヘッダに続くピクセルデータのバイト数. 1 ピクセル 3 バイトで詰め物はない.
    pub fn payload_len(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                Error::Format(format!(
                    "image size {}x{} overflows",
                    self.width, self.height
                ))
            })
    }

    // http://netpbm.sourceforge.net/doc/ppm.html
    pub fn read(mut reader: impl BufRead) -> Result<Self> {
        let magic = next_line(&mut reader, "magic number")?;
        if magic != "P6" {
            return Err(Error::Format(format!(
                "expected magic number \"P6\", but found {:?}",
                magic
            )));
        }

        let dims = next_line(&mut reader, "image size")?;
        let (width, height) = match dims.split_ascii_whitespace().collect::<Vec<_>>()[..] {
            [w, h] => (
                parse_field(w, "width")?,
                parse_field(h, "height")?,
            ),
            _ => {
                return Err(Error::Format(format!(
                    "expected \"<width> <height>\", but found {:?}",
                    dims
                )))
            }
        };

        let max = next_line(&mut reader, "maximum color value")?;
        let max_color_value: u16 = parse_field(&max, "maximum color value")?;
        if max_color_value == 0 || max_color_value > 255 {
            return Err(Error::Format(format!(
                "maximum color value must be in 1..=255, but found {}",
                max_color_value
            )));
        }

        let header = Self {
            width,
            height,
            max_color_value,
        };
        log::debug!("parsed PPM header {:?}", header);
        Ok(header)
    }
}

/// 次のヘッダ行を返す. `#` で始まる行と空行は読み飛ばす.
fn next_line(reader: &mut impl BufRead, what: &'static str) -> Result<String> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(Error::UnexpectedEof(what));
        }
        if line.starts_with(b"#") {
            continue;
        }
        let text = std::str::from_utf8(&line)
            .map_err(|_| Error::Format(format!("{} is not ASCII", what)))?
            .trim();
        if !text.is_empty() {
            return Ok(text.to_owned());
        }
    }
}

fn parse_field<T: std::str::FromStr>(token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::Format(format!("failed to parse {}: {:?}", what, token)))
}

/// P6 形式の PPM を読み込む. ピクセルデータがヘッダの宣言より短ければエラーにする.
pub fn read_ppm(data: impl Read) -> Result<(PpmHeader, Image)> {
    let mut reader = BufReader::new(data);
    let header = PpmHeader::read(&mut reader)?;
    let expected = header.payload_len()?;

    // the payload may be far shorter than the header declares
    let mut payload = Vec::with_capacity(expected.min(1 << 20));
    reader.take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() != expected {
        return Err(Error::IncompleteData {
            expected,
            actual: payload.len(),
        });
    }

    let image = Image::from_raw(header.width, header.height, &payload)
        .ok_or(Error::IncompleteData {
            expected,
            actual: payload.len(),
        })?;
    Ok((header, image))
}

pub fn read_ppm_file(path: &Path) -> Result<(PpmHeader, Image)> {
    let file = File::open(path)?;
    read_ppm(file)
}

impl Image {
    pub fn write_ppm(&self, mut out: impl Write) -> Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        out.write_all(&self.to_raw())?;
        Ok(())
    }
}

/// 画像ファイルを形式を推定して読み込み, 8 ビット RGB に変換する.
pub fn load_image(path: &Path) -> Result<Image> {
    let reader = ::image::io::Reader::open(path)?.with_guessed_format()?;
    let rgb = reader.decode()?.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("loaded {} ({}x{})", path.display(), width, height);

    Image::from_raw(width, height, &rgb.into_raw()).ok_or_else(|| {
        Error::Format(format!("decoder returned a short buffer for {}", path.display()))
    })
}
