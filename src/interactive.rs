use crate::device::SnapSession;
use crate::error::SnapError;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

// SIGINT 到达时由信号处理器置位，主循环轮询
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// 读取循环的一次分发结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 抓取一张截图，可选屏幕名称
    Capture(Option<String>),
    /// 重新打印设备信息
    Info,
    /// 打印总结并退出
    Quit,
}

/// 将一行输入映射为动作
///
/// `q`/`i` 不区分大小写；空行为自动命名抓取；其余文本去掉首尾空白后
/// 作为屏幕名称。
pub fn parse_line(line: &str) -> Action {
    let trimmed = line.trim();

    if trimmed.eq_ignore_ascii_case("q") {
        Action::Quit
    } else if trimmed.eq_ignore_ascii_case("i") {
        Action::Info
    } else if trimmed.is_empty() {
        Action::Capture(None)
    } else {
        Action::Capture(Some(trimmed.to_string()))
    }
}

impl SnapSession {
    /// 运行交互式抓取循环
    ///
    /// 连接检查失败时打印指引并直接返回。循环中 SIGINT 和标准输入
    /// 关闭都与输入 `q` 等价：打印同样的总结后退出。
    pub fn run_interactive(&mut self) {
        print_banner();

        let device = match self.check_connection() {
            Ok(device) => device,
            Err(e) => {
                print_connection_guidance(&e);
                return;
            }
        };
        println!("✅ Connected to device: {}", device.id);

        self.print_device_report();
        println!("💾 Saving to: {}\n", self.absolute_output_dir().display());
        print_instructions();

        install_sigint_handler();
        let lines = spawn_stdin_reader();

        loop {
            print!("Enter screen name (or ENTER for auto, i=info, q=quit): ");
            let _ = io::stdout().flush();

            let line = match recv_line(&lines) {
                Some(line) => line,
                None => {
                    // 中断或 EOF，与 q 相同
                    println!();
                    self.print_summary();
                    return;
                }
            };

            match parse_line(&line) {
                Action::Quit => {
                    self.print_summary();
                    return;
                }
                Action::Info => self.print_device_report(),
                Action::Capture(name) => {
                    self.capture_and_report(name.as_deref());
                }
            }
        }
    }

    /// 抓取一张截图并向用户报告结果
    pub fn capture_and_report(&mut self, screen_name: Option<&str>) -> bool {
        print!("📸 Capturing screenshot... ");
        let _ = io::stdout().flush();

        match self.capture_screenshot(screen_name) {
            Ok(path) => {
                println!("✅ Saved: {}", path.display());
                true
            }
            Err(e) => {
                println!("❌ Failed: {}", e);
                false
            }
        }
    }

    /// 打印设备型号、系统版本和屏幕信息
    ///
    /// 信息查询失败不会中断会话：型号和版本退化为 "Unknown"，
    /// 屏幕信息退化为 "Unable to detect"。
    pub fn print_device_report(&self) {
        let (model, version) = match self.device_info() {
            Ok(info) => (info.model, info.android_version),
            Err(e) => {
                debug!("设备信息查询失败: {}", e);
                ("Unknown".to_string(), "Unknown".to_string())
            }
        };
        println!("📱 Device: {} (Android {})", model, version);

        match self.display_info() {
            Ok(info) => {
                println!(
                    "📐 Resolution: {}x{}px (physical) | {}x{}dp (logical)",
                    info.physical.0, info.physical.1, info.logical.0, info.logical.1
                );
                println!("   Density: {} DPI", info.density);
            }
            Err(e) => {
                debug!("屏幕信息查询失败: {}", e);
                println!("📐 Resolution: Unable to detect");
            }
        }
    }

    /// 打印会话总结
    pub fn print_summary(&self) {
        println!(
            "\n✅ Done! Captured {} screenshots",
            self.screenshot_count()
        );
        println!("📁 Location: {}", self.absolute_output_dir().display());
    }

    /// 输出目录的绝对路径
    fn absolute_output_dir(&self) -> PathBuf {
        std::fs::canonicalize(self.output_dir())
            .unwrap_or_else(|_| self.output_dir().to_path_buf())
    }
}

/// 打印连接失败的排查指引
pub fn print_connection_guidance(err: &SnapError) {
    match err {
        SnapError::ToolNotFound(path) => {
            println!("❌ ADB not found: {}", path);
            println!("\nInstall Android Platform Tools:");
            println!("  brew install android-platform-tools");
            println!("  (or your distribution's android-tools package)");
        }
        SnapError::DeviceNotFound(_) => {
            println!("❌ No Android device connected!");
            println!("\nMake sure:");
            println!("  1. Your phone is connected via USB");
            println!("  2. USB debugging is enabled");
            println!("  3. You've authorized the computer on your phone");
        }
        other => {
            println!("❌ Error running ADB: {}", other);
        }
    }
}

fn print_banner() {
    println!("\n{}", "=".repeat(60));
    println!("  Android Screenshot Capture Tool");
    println!("{}", "=".repeat(60));
}

fn print_instructions() {
    println!("Instructions:");
    println!("  • Navigate your app on the phone normally");
    println!("  • Type a screen name (e.g., 'login', 'dashboard') and press ENTER to capture");
    println!("  • Or just press ENTER without typing for auto-naming");
    println!("  • Type 'i' then ENTER to show device info");
    println!("  • Type 'q' then ENTER to quit");
    println!("\n{}", "=".repeat(60));
    println!("Ready! Start capturing screenshots...\n");
}

/// 在专用线程上读取标准输入，逐行发送到通道
///
/// 标准输入关闭时通道断开，主循环将其视为退出。
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    rx
}

/// 等待下一行输入；中断或通道断开时返回 None
fn recv_line(lines: &Receiver<String>) -> Option<String> {
    loop {
        if INTERRUPTED.load(Ordering::SeqCst) {
            return None;
        }

        match lines.recv_timeout(Duration::from_millis(200)) {
            Ok(line) => return Some(line),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

#[cfg(unix)]
fn install_sigint_handler() {
    use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

    extern "C" fn handle_sigint(_: i32) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }

    let action = SigAction::new(
        SigHandler::Handler(handle_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );

    // 替换默认处理器，让阻塞中的读取循环自行收尾
    unsafe {
        let _ = signal::sigaction(Signal::SIGINT, &action);
    }
}

#[cfg(not(unix))]
fn install_sigint_handler() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_and_info_are_case_insensitive() {
        assert_eq!(parse_line("q"), Action::Quit);
        assert_eq!(parse_line("Q"), Action::Quit);
        assert_eq!(parse_line("i"), Action::Info);
        assert_eq!(parse_line("I"), Action::Info);
    }

    #[test]
    fn empty_line_is_auto_capture() {
        assert_eq!(parse_line(""), Action::Capture(None));
        assert_eq!(parse_line("   "), Action::Capture(None));
    }

    #[test]
    fn other_text_is_named_capture_trimmed() {
        assert_eq!(
            parse_line("login"),
            Action::Capture(Some("login".to_string()))
        );
        assert_eq!(
            parse_line("  home screen  "),
            Action::Capture(Some("home screen".to_string()))
        );
    }

    #[test]
    fn dispatch_sequence_matches_session_transcript() {
        let inputs = ["login", "", "i", "q"];
        let actions: Vec<Action> = inputs.iter().map(|l| parse_line(l)).collect();

        assert_eq!(
            actions,
            vec![
                Action::Capture(Some("login".to_string())),
                Action::Capture(None),
                Action::Info,
                Action::Quit,
            ]
        );

        // 两次抓取，一次信息重印，随后退出
        let captures = actions
            .iter()
            .filter(|a| matches!(a, Action::Capture(_)))
            .count();
        assert_eq!(captures, 2);
    }
}
