use crate::device::SnapSession;
use crate::error::SnapResult;
use crate::utils::sanitize_name;
use chrono::Local;
use log::{debug, info};
use std::path::PathBuf;

impl SnapSession {
    /// 从设备抓取一张截图并保存到输出目录
    ///
    /// 依次执行三个子进程步骤：设备端 `screencap` 到临时路径、
    /// `pull` 到本地输出路径、删除设备端临时文件。任一步骤失败即中止，
    /// 不做部分清理（screencap 成功但 pull 失败时临时文件可能留在设备上）。
    ///
    /// 计数器在命名时递增：提供名称时数字不进入文件名，但依然前进；
    /// 捕获失败也不回退。
    pub fn capture_screenshot(&mut self, screen_name: Option<&str>) -> SnapResult<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        self.screenshot_count += 1;

        let filename = build_filename(self.screenshot_count, &timestamp, screen_name);
        let filepath = self.config.output_dir.join(&filename);
        let device_path = self.device_temp_path.clone();

        debug!("在设备上截图到 {}", device_path);
        self.shell(&format!("screencap -p {}", device_path))?;

        self.pull(&device_path, &filepath.to_string_lossy())?;

        // 清理设备上的临时文件
        self.shell(&format!("rm {}", device_path))?;

        info!("截图已保存到 {}", filepath.display());
        Ok(filepath)
    }
}

/// 构建截图文件名
///
/// 提供名称时为 `<清理后的名称>_<时间戳>.png`，
/// 否则为 `screenshot_<计数器三位>_<时间戳>.png`。
pub(crate) fn build_filename(counter: u32, timestamp: &str, screen_name: Option<&str>) -> String {
    match screen_name {
        Some(name) => format!("{}_{}.png", sanitize_name(name), timestamp),
        None => format!("screenshot_{:03}_{}.png", counter, timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapConfigBuilder;

    #[test]
    fn auto_name_pads_counter_to_three_digits() {
        assert_eq!(
            build_filename(3, "20240101_120000", None),
            "screenshot_003_20240101_120000.png"
        );
        assert_eq!(
            build_filename(120, "20240101_120000", None),
            "screenshot_120_20240101_120000.png"
        );
    }

    #[test]
    fn named_file_uses_sanitized_name() {
        assert_eq!(
            build_filename(7, "20240101_120000", Some("Login Page!")),
            "Login_Page__20240101_120000.png"
        );
    }

    #[test]
    fn counter_digits_do_not_appear_in_named_file() {
        let filename = build_filename(42, "20240101_120000", Some("dashboard"));
        assert_eq!(filename, "dashboard_20240101_120000.png");
    }

    /// 写一个假 adb 脚本用于不依赖真实设备的测试
    #[cfg(unix)]
    fn write_fake_adb(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("adb");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn successful_capture_pulls_file_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        // pull 时向目标路径写入内容，其余子命令直接成功
        let fake_adb = write_fake_adb(
            dir.path(),
            "if [ \"$1\" = \"pull\" ]; then echo fake-png > \"$3\"; fi\nexit 0",
        );

        let output = dir.path().join("screens");
        let config = SnapConfigBuilder::default()
            .adb_path(&fake_adb)
            .output_dir(&output)
            .build();

        let mut session = crate::SnapSession::new(config).unwrap();
        let path = session.capture_screenshot(None).unwrap();

        assert!(path.exists());
        let filename = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(filename.starts_with("screenshot_001_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(session.screenshot_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn failed_pull_leaves_no_local_file() {
        let dir = tempfile::tempdir().unwrap();
        // screencap 成功但 pull 失败
        let fake_adb = write_fake_adb(
            dir.path(),
            "if [ \"$1\" = \"pull\" ]; then echo 'adb: error: remote object does not exist' >&2; exit 1; fi\nexit 0",
        );

        let output = dir.path().join("screens");
        let config = SnapConfigBuilder::default()
            .adb_path(&fake_adb)
            .output_dir(&output)
            .build();

        let mut session = crate::SnapSession::new(config).unwrap();
        let err = session.capture_screenshot(Some("login")).unwrap_err();

        assert!(matches!(err, crate::SnapError::CommandFailed(_)));
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
        assert_eq!(session.screenshot_count(), 1);
    }

    #[test]
    fn failed_capture_advances_counter_and_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("screens");
        let config = SnapConfigBuilder::default()
            .adb_path("/nonexistent/adb-for-test")
            .output_dir(&output)
            .build();

        let mut session = crate::SnapSession::new(config).unwrap();
        let result = session.capture_screenshot(Some("login"));

        assert!(result.is_err());
        assert_eq!(session.screenshot_count(), 1);
        // 设备端 screencap 都没跑成，本地不应出现任何文件
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);

        // 再失败一次，计数器继续前进
        let _ = session.capture_screenshot(None);
        assert_eq!(session.screenshot_count(), 2);
    }
}
