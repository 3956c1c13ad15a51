use crate::device::{AdbDevice, DeviceInfo, SnapSession};
use crate::error::{SnapError, SnapResult};
use log::{debug, info, trace, warn};
use std::process::Command;

impl SnapSession {
    /// 执行任意 ADB 命令并返回标准输出
    pub fn exec(&self, args: &[&str]) -> SnapResult<String> {
        let mut cmd = Command::new(&self.config.adb_path);

        // 添加全局附加参数（如果有）
        if let Some(additional_args) = &self.config.additional_args {
            for arg in additional_args {
                cmd.arg(arg);
            }
        }

        for arg in args {
            cmd.arg(arg);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SnapError::ToolNotFound(self.config.adb_path.display().to_string())
            } else {
                SnapError::CommandFailed(format!("无法执行 ADB: {}", e))
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let error_msg = if !stderr.is_empty() { stderr } else { stdout };
            return Err(SnapError::CommandFailed(error_msg.trim().to_string()));
        }

        trace!("ADB 命令 {:?} 输出: {}", args, stdout);
        Ok(stdout)
    }

    /// 在设备上执行 shell 命令
    pub fn shell(&self, command: &str) -> SnapResult<String> {
        let mut cmd = Command::new(&self.config.adb_path);

        // 如果指定了设备序列号则添加
        let serial = self.serial();
        if !serial.is_empty() {
            cmd.arg("-s").arg(serial);
        }

        let output = cmd.arg("shell").arg(command).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SnapError::ToolNotFound(self.config.adb_path.display().to_string())
            } else {
                SnapError::DeviceError(format!("无法执行 ADB shell: {}", e))
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(SnapError::DeviceError(format!(
                "ADB shell 命令失败: {}",
                stderr.trim()
            )));
        }

        if !stderr.is_empty() {
            warn!("ADB shell 命令产生了 stderr 输出: {}", stderr);
        }

        trace!("Shell 命令 '{}' 输出: {}", command, stdout);
        Ok(stdout)
    }

    /// 从设备拉取文件到本地路径
    pub fn pull(&self, device_path: &str, local_path: &str) -> SnapResult<()> {
        let mut cmd = Command::new(&self.config.adb_path);

        let serial = self.serial();
        if !serial.is_empty() {
            cmd.arg("-s").arg(serial);
        }

        cmd.arg("pull").arg(device_path).arg(local_path);

        debug!("开始从设备拉取文件: {} -> {}", device_path, local_path);
        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SnapError::ToolNotFound(self.config.adb_path.display().to_string())
            } else {
                SnapError::CommandFailed(format!("执行 ADB pull 命令失败: {}", e))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapError::CommandFailed(format!(
                "ADB pull 命令失败: {}",
                stderr.trim()
            )));
        }

        debug!("成功拉取文件 {} 到 {}", device_path, local_path);
        Ok(())
    }

    /// 列出已连接的设备
    pub fn list_devices(&self) -> SnapResult<Vec<AdbDevice>> {
        let stdout = self.exec(&["devices", "-l"])?;
        let devices = parse_devices_output(&stdout);
        info!("发现 {} 个 ADB 设备", devices.len());
        Ok(devices)
    }

    /// 检查连接并返回将要使用的设备
    ///
    /// 配置了序列号时要求该设备在线，否则使用第一个在线设备。
    pub fn check_connection(&self) -> SnapResult<AdbDevice> {
        let devices = self.list_devices()?;

        if let Some(serial) = &self.config.device_serial {
            return devices
                .into_iter()
                .find(|d| &d.id == serial && d.is_online())
                .ok_or_else(|| SnapError::DeviceNotFound(serial.clone()));
        }

        devices
            .into_iter()
            .find(AdbDevice::is_online)
            .ok_or_else(|| SnapError::DeviceNotFound("没有在线设备".to_string()))
    }

    /// 获取设备属性
    pub fn get_prop(&self, prop_name: &str) -> SnapResult<String> {
        let command = format!("getprop {}", prop_name);
        let output = self.shell(&command)?;
        Ok(output.trim().to_string())
    }

    /// 查询设备型号和 Android 版本
    ///
    /// 每次调用都重新查询设备，不做缓存。
    pub fn device_info(&self) -> SnapResult<DeviceInfo> {
        let model = self.get_prop("ro.product.model")?;
        let android_version = self.get_prop("ro.build.version.release")?;

        Ok(DeviceInfo {
            model,
            android_version,
        })
    }
}

/// 解析 `adb devices -l` 的输出
///
/// 跳过第一行标题，每行按空白拆分为序列号、状态和可选属性。
pub(crate) fn parse_devices_output(stdout: &str) -> Vec<AdbDevice> {
    let mut devices = Vec::new();

    for line in stdout.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }

        let mut device = AdbDevice::new(parts[0], parts[1]);

        if let Some(model_part) = parts.iter().find(|p| p.starts_with("model:")) {
            device = device.with_model(model_part.trim_start_matches("model:"));
        }

        if let Some(product_part) = parts.iter().find(|p| p.starts_with("product:")) {
            device = device.with_product(product_part.trim_start_matches("product:"));
        }

        devices.push(device);
    }

    devices
}
