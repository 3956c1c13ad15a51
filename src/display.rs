use crate::device::SnapSession;
use crate::error::{SnapError, SnapResult};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// 匹配 "Physical size: 1080x2400"
static PHYSICAL_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Physical size:\s*(\d+)x(\d+)").unwrap());

// 匹配 "Physical density: 420"
static PHYSICAL_DENSITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Physical density:\s*(\d+)").unwrap());

/// 屏幕分辨率信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    /// 物理分辨率（像素）
    pub physical: (u32, u32),
    /// 逻辑分辨率（dp），由物理分辨率和密度推导
    pub logical: (u32, u32),
    /// 屏幕密度（DPI）
    pub density: u32,
}

impl DisplayInfo {
    /// 由物理尺寸和密度构造，逻辑尺寸向上取整推导
    pub fn new(width: u32, height: u32, density: u32) -> Self {
        Self {
            physical: (width, height),
            logical: (
                crate::utils::px_to_dp(width, density),
                crate::utils::px_to_dp(height, density),
            ),
            density,
        }
    }
}

impl SnapSession {
    /// 查询屏幕物理/逻辑分辨率和密度
    ///
    /// 物理尺寸和密度分别来自 `wm size` 和 `wm density` 的输出；
    /// 任一标签缺失都返回 [`SnapError::ParseError`]。
    pub fn display_info(&self) -> SnapResult<DisplayInfo> {
        let size_output = self.shell("wm size")?;
        let (width, height) = parse_physical_size(&size_output)?;

        let density_output = self.shell("wm density")?;
        let density = parse_physical_density(&density_output)?;

        let info = DisplayInfo::new(width, height, density);
        debug!(
            "屏幕信息: {}x{}px / {}x{}dp @ {}dpi",
            info.physical.0, info.physical.1, info.logical.0, info.logical.1, info.density
        );
        Ok(info)
    }
}

/// 从 `wm size` 输出解析物理分辨率
pub(crate) fn parse_physical_size(output: &str) -> SnapResult<(u32, u32)> {
    let caps = PHYSICAL_SIZE_RE
        .captures(output)
        .ok_or_else(|| SnapError::ParseError("wm size 输出中没有 Physical size 标签".to_string()))?;

    let width = caps[1].parse::<u32>()?;
    let height = caps[2].parse::<u32>()?;
    Ok((width, height))
}

/// 从 `wm density` 输出解析物理密度
pub(crate) fn parse_physical_density(output: &str) -> SnapResult<u32> {
    let caps = PHYSICAL_DENSITY_RE.captures(output).ok_or_else(|| {
        SnapError::ParseError("wm density 输出中没有 Physical density 标签".to_string())
    })?;

    Ok(caps[1].parse::<u32>()?)
}
