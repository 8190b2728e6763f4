/// `Color` は 24 ビットの RGB カラーを表す.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:06x}",
            (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
        )
    }
}

impl Color {
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub(crate) fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// `Image` は読み込んだ画像のピクセル列を行優先で保持する.
///
/// `pixels.len()` は必ず `width * height` に等しい.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixels: Vec<Color>,
}

impl Image {
    /// `raw` は RGB の 3 バイト組を並べたもの. 長さが合わなければ `None`.
    pub fn from_raw(width: u32, height: u32, raw: &[u8]) -> Option<Self> {
        if raw.len() as u64 != width as u64 * height as u64 * 3 {
            return None;
        }
        let pixels = raw
            .chunks(3)
            .map(|a| Color {
                r: a[0],
                g: a[1],
                b: a[2],
            })
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Color {
        &mut self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|x| [x.r, x.g, x.b]).collect()
    }
}

#[test]
fn test_color_debug() {
    assert_eq!(
        format!(
            "{:?}",
            Color {
                r: 0x12,
                g: 0xab,
                b: 0x05
            }
        ),
        "12ab05"
    );
}

#[test]
fn test_from_raw_rejects_wrong_length() {
    assert!(Image::from_raw(2, 2, &[0; 11]).is_none());
    let img = Image::from_raw(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(img.pixel(1, 0), Color { r: 4, g: 5, b: 6 });
    assert_eq!(img.to_raw(), vec![1, 2, 3, 4, 5, 6]);
}
