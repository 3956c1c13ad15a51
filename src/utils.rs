use rand::Rng;

/// 清理用户输入的屏幕名称
///
/// 任何非字母数字、`-`、`_` 的字符都替换为 `_`，长度和位置保持不变。
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// 生成会话唯一的设备端临时文件路径
///
/// 随机后缀避免两个同时运行的会话互相覆盖对方的临时文件。
pub fn session_temp_path() -> String {
    let random_string: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    format!("/sdcard/snap_{}.png", random_string)
}

/// 物理像素转换为逻辑 dp 尺寸
///
/// 公式: ceil(px / (density / 160))，向上取整以与平台自身的视口计算一致。
pub fn px_to_dp(px: u32, density: u32) -> u32 {
    (f64::from(px) / (f64::from(density) / 160.0)).ceil() as u32
}
