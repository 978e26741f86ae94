//! 交互式身份输入

use std::io::{self, BufRead, IsTerminal, Write};
use tracing::warn;

/// 阻塞式提示
///
/// 返回 `None` 表示用户取消。
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    fn prompt(&self, message: &str) -> Option<String>;
}

/// 从标准输入读取一行，提示语写到标准错误
pub struct StdinPrompt;

impl StdinPrompt {
    fn read_answer(message: &str, input: &mut impl BufRead, output: &mut impl Write) -> Option<String> {
        if let Err(e) = write!(output, "{} ", message).and_then(|_| output.flush()) {
            warn!(error = %e, "failed to write prompt");
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                warn!(error = %e, "failed to read prompt answer");
                None
            }
        }
    }
}

impl Prompt for StdinPrompt {
    fn prompt(&self, message: &str) -> Option<String> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stderr();
        Self::read_answer(message, &mut input, &mut output)
    }
}

/// 非交互环境下的提示，总是视为取消
pub struct NonInteractivePrompt;

impl Prompt for NonInteractivePrompt {
    fn prompt(&self, _message: &str) -> Option<String> {
        None
    }
}

/// 根据配置和终端状态选择提示实现
pub fn create_prompt(interactive: bool) -> Box<dyn Prompt> {
    if interactive && io::stdin().is_terminal() {
        Box::new(StdinPrompt)
    } else {
        Box::new(NonInteractivePrompt)
    }
}
