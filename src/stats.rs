use crate::{
    error::{Error, Result},
    region::Region,
};

/// 黒とみなす各チャンネル平均値の上限 (この値未満なら黒).
pub const BLACK_THRESHOLD: f64 = 10.0;

/// `ChannelStats` は 1 チャンネル分の統計量を表す. `std` は母標準偏差.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub mean: f64,
    pub min: u8,
    pub max: u8,
    pub std: f64,
}

/// `RegionStats` は領域の R, G, B それぞれの統計量を表す.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    pub channels: [ChannelStats; 3],
    pub count: usize,
}

#[derive(Clone, Copy)]
struct Welford {
    mean: f64,
    m2: f64,
    min: u8,
    max: u8,
}

impl Welford {
    fn new() -> Self {
        Self {
            mean: 0.0,
            m2: 0.0,
            min: u8::MAX,
            max: u8::MIN,
        }
    }

    fn push(&mut self, n: usize, v: u8) {
        let v = v as f64;
        let delta = v - self.mean;
        self.mean += delta / n as f64;
        self.m2 += delta * (v - self.mean);
    }

    fn finish(self, n: usize) -> ChannelStats {
        ChannelStats {
            mean: self.mean,
            min: self.min,
            max: self.max,
            std: (self.m2 / n as f64).max(0.0).sqrt(),
        }
    }
}

impl RegionStats {
    /// 領域内の全ピクセルを一度だけ走査して統計量を求める.
    pub fn compute(region: &Region<'_>) -> Result<Self> {
        if region.is_empty() {
            return Err(Error::EmptyRegion(region.width()));
        }

        let mut acc = [Welford::new(); 3];
        let mut n = 0;
        for color in region.pixels() {
            n += 1;
            for (w, v) in acc.iter_mut().zip(color.channels().iter().copied()) {
                w.min = w.min.min(v);
                w.max = w.max.max(v);
                w.push(n, v);
            }
        }

        Ok(Self {
            channels: [acc[0].finish(n), acc[1].finish(n), acc[2].finish(n)],
            count: n,
        })
    }

    pub fn means(&self) -> [f64; 3] {
        [
            self.channels[0].mean,
            self.channels[1].mean,
            self.channels[2].mean,
        ]
    }

    /// 全チャンネルの平均値が `threshold` 未満なら黒と判定する.
    pub fn is_black(&self, threshold: f64) -> bool {
        is_black(self.means(), threshold)
    }
}

pub fn is_black(means: [f64; 3], threshold: f64) -> bool {
    means.iter().all(|&m| m < threshold)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::basis::{Color, Image},
        rand::prelude::*,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn uniform_region() {
        for &v in &[0, 1, 128, 255] {
            let image = Image::filled(16, 16, Color::gray(v));
            let region = Region::centered(&image, 8, 8, 10).unwrap();
            let stats = RegionStats::compute(&region).unwrap();
            assert_eq!(stats.count, 100);
            for c in &stats.channels {
                assert!(close(c.mean, v as f64));
                assert_eq!((c.min, c.max), (v, v));
                assert!(close(c.std, 0.0));
            }
        }
    }

    #[test]
    fn matches_two_pass_population_std() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut raw = vec![0; 32 * 32 * 3];
        rng.fill_bytes(&mut raw);
        let image = Image::from_raw(32, 32, &raw).unwrap();
        let region = Region::centered(&image, 16, 16, 20).unwrap();
        let stats = RegionStats::compute(&region).unwrap();

        let pixels = region.pixels().collect::<Vec<_>>();
        for ch in 0..3 {
            let values = pixels
                .iter()
                .map(|c| c.channels()[ch] as f64)
                .collect::<Vec<_>>();
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            let got = stats.channels[ch];
            assert!((got.mean - mean).abs() < 1e-9);
            assert!((got.std - var.sqrt()).abs() < 1e-9);
            assert_eq!(got.min as f64, values.iter().cloned().fold(f64::MAX, f64::min));
            assert_eq!(got.max as f64, values.iter().cloned().fold(f64::MIN, f64::max));
        }
    }

    #[test]
    fn known_values() {
        // red alternates 0 and 10
        let image = Image::from_raw(2, 2, &[0, 0, 0, 10, 0, 0, 0, 0, 0, 10, 0, 0]).unwrap();
        let region = Region::centered(&image, 1, 1, 2).unwrap();
        let stats = RegionStats::compute(&region).unwrap();
        assert!(close(stats.channels[0].mean, 5.0));
        assert!(close(stats.channels[0].std, 5.0));
        assert_eq!((stats.channels[0].min, stats.channels[0].max), (0, 10));
    }

    #[test]
    fn empty_region_is_an_error() {
        let image = Image::filled(4, 4, Color::gray(50));
        let region = Region::centered(&image, 2, 2, 1).unwrap();
        assert!(matches!(
            RegionStats::compute(&region),
            Err(Error::EmptyRegion(_))
        ));
    }

    #[test]
    fn black_threshold_is_strict() {
        assert!(is_black([5.0, 5.0, 5.0], BLACK_THRESHOLD));
        assert!(!is_black([5.0, 5.0, 11.0], BLACK_THRESHOLD));
        assert!(!is_black([10.0, 0.0, 0.0], BLACK_THRESHOLD));
        assert!(is_black([9.99, 9.99, 9.99], BLACK_THRESHOLD));
    }
}
