/// Get environment variable with SIGNALHUB_ prefix, falling back to the
/// unprefixed name
///
/// Checks `SIGNALHUB_{key}` first, then `{key}`, so standard variables
/// like `PORT` keep working on platforms that inject them.
///
/// # Examples
///
/// ```rust
/// use signalhub::utils::get_env_with_prefix;
///
/// // Checks SIGNALHUB_PORT first, then PORT
/// let port = get_env_with_prefix("PORT");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("SIGNALHUB_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}
