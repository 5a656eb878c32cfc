use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// 在临时环境变量下执行 `f`，结束后恢复原值。
pub fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let backup: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();
    apply(vars.iter().map(|(key, value)| (*key, *value)));
    f();
    apply(
        backup
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref())),
    );
}

fn apply<'a>(vars: impl Iterator<Item = (&'a str, Option<&'a str>)>) {
    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
