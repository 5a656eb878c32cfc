//! 生成过程中轮播的进度提示。

use std::time::Duration;

/// 轮播的提示语，按顺序循环。
pub const MESSAGES: [&str; 5] = [
    "Mixing & matching styles...",
    "Consulting our AI stylist...",
    "Tailoring the perfect fit...",
    "Applying the finishing touches...",
    "Your new look is almost ready!",
];

/// 切换间隔。
pub const INTERVAL: Duration = Duration::from_millis(2500);

/// 固定展示的副标题。
pub const PATIENCE_HINT: &str = "This can take a moment, please be patient.";

/// 无限循环的提示语迭代器。
#[derive(Debug, Clone, Default)]
pub struct ProgressMessages {
    next: usize,
}

impl ProgressMessages {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }
}

impl Iterator for ProgressMessages {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        let message = MESSAGES[self.next];
        self.next = (self.next + 1) % MESSAGES.len();
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_wrap_around() {
        let seen: Vec<_> = ProgressMessages::new().take(MESSAGES.len() + 2).collect();
        assert_eq!(&seen[..MESSAGES.len()], &MESSAGES);
        assert_eq!(seen[MESSAGES.len()], MESSAGES[0]);
        assert_eq!(seen[MESSAGES.len() + 1], MESSAGES[1]);
    }
}
