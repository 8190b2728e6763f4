use crate::{
    basis::{Color, Image},
    error::{Error, Result},
};

/// `Region` は `Image` 上の矩形領域への読み取り専用の参照を表す.
///
/// 領域は必ず画像の内側に収まる.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    image: &'a Image,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl<'a> Region<'a> {
    /// `(cx, cy)` を中心とする一辺 `size` の正方形領域
    /// `[cy - size/2, cy + size/2) x [cx - size/2, cx + size/2)` を切り出す.
    ///
    /// `size / 2` は切り捨てなので, 奇数の `size` では一辺が 1 小さくなる.
    pub fn centered(image: &'a Image, cx: u32, cy: u32, size: u32) -> Result<Self> {
        let half = (size / 2) as i64;
        let (left, right) = (cx as i64 - half, cx as i64 + half);
        let (top, bottom) = (cy as i64 - half, cy as i64 + half);

        if left < 0 || top < 0 || right > image.width as i64 || bottom > image.height as i64 {
            return Err(Error::RegionOutOfBounds {
                left,
                top,
                right,
                bottom,
                width: image.width,
                height: image.height,
            });
        }

        log::debug!(
            "region [{}, {}) x [{}, {}) around ({}, {})",
            left,
            right,
            top,
            bottom,
            cx,
            cy
        );
        Ok(Self {
            image,
            left: left as u32,
            top: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 領域内のピクセルを行優先で走査する.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + 'a {
        let Self {
            image,
            left,
            top,
            width,
            height,
        } = *self;
        (top..top + height).flat_map(move |y| {
            let start = y as usize * image.width as usize + left as usize;
            image.pixels[start..start + width as usize].iter().copied()
        })
    }
}
