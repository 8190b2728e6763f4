use {
    crate::{
        basis::Image,
        error::{Error, Result},
        region::Region,
        stats::RegionStats,
    },
    std::{fmt, str::FromStr},
};

pub const DEFAULT_IMAGE_PATH: &str = "normal_mapping_output.png";

/// `Probe` は検査する正方形領域の名前, 中心座標, 一辺の長さを表す.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub name: String,
    pub center_x: u32,
    pub center_y: u32,
    pub size: u32,
}

impl Probe {
    pub fn new(name: impl Into<String>, center_x: u32, center_y: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            center_x,
            center_y,
            size,
        }
    }

    /// 800x600 の出力画像で左右に並ぶ 2 つの球.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("smooth", 200, 300, 100),
            Self::new("normal-mapped", 600, 300, 100),
        ]
    }
}

/// `cx,cy,size` または `name=cx,cy,size`.
impl FromStr for Probe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, coords) = match s.find('=') {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => (s, s),
        };

        let fields = coords
            .split(',')
            .map(|t| t.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>();
        match fields.as_deref() {
            Ok(&[cx, cy, size]) => Ok(Self::new(name, cx, cy, size)),
            _ => Err(Error::Usage(format!(
                "expected a probe as \"cx,cy,size\" or \"name=cx,cy,size\", but found {:?}",
                s
            ))),
        }
    }
}

/// `ProbeReport` は 1 つの領域の統計量と判定結果を表す.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub probe: Probe,
    pub stats: RegionStats,
    pub black: bool,
}

impl ProbeReport {
    pub fn passed(&self) -> bool {
        !self.black
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.probe;
        let [r, g, b] = self.stats.channels;
        writeln!(
            f,
            "{} sphere ({},{}) size {}x{}:",
            p.name, p.center_x, p.center_y, p.size, p.size
        )?;
        writeln!(f, "  mean: RGB({:.1}, {:.1}, {:.1})", r.mean, g.mean, b.mean)?;
        writeln!(f, "  min:  RGB({}, {}, {})", r.min, g.min, b.min)?;
        writeln!(f, "  max:  RGB({}, {}, {})", r.max, g.max, b.max)?;
        writeln!(f, "  std:  RGB({:.1}, {:.1}, {:.1})", r.std, g.std, b.std)?;
        if self.black {
            write!(f, "  FAIL: {} sphere is black", p.name)
        } else {
            write!(f, "  ok: {} sphere has color", p.name)
        }
    }
}

/// `Report` は全領域の結果をまとめたもので, 全て黒でなければ合格.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub probes: Vec<ProbeReport>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.probes.iter().all(ProbeReport::passed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for probe in &self.probes {
            writeln!(f, "{}\n", probe)?;
        }
        writeln!(f, "{}", "=".repeat(60))?;
        if self.passed() {
            write!(f, "PASS: every sphere is rendered")
        } else {
            let black = self
                .probes
                .iter()
                .filter(|p| p.black)
                .map(|p| p.probe.name.as_str())
                .collect::<Vec<_>>();
            write!(f, "FAIL: black sphere(s): {}", black.join(", "))
        }
    }
}

pub fn check_probe(image: &Image, probe: &Probe, threshold: f64) -> Result<ProbeReport> {
    let region = Region::centered(image, probe.center_x, probe.center_y, probe.size)?;
    let stats = RegionStats::compute(&region)?;
    let black = stats.is_black(threshold);
    if black {
        log::warn!("{} probe is black: means {:?}", probe.name, stats.means());
    }
    Ok(ProbeReport {
        probe: probe.clone(),
        stats,
        black,
    })
}

pub fn validate(image: &Image, probes: &[Probe], threshold: f64) -> Result<Report> {
    let probes = probes
        .iter()
        .map(|probe| check_probe(image, probe, threshold))
        .collect::<Result<Vec<_>>>()?;
    Ok(Report { probes })
}

#[cfg(test)]
mod tests;
