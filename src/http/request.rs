use super::target::TargetUrl;

/// Renders the single GET request every worker repeats for the whole run.
pub(crate) fn render_get_request(target: &TargetUrl, user_agent: &str) -> Vec<u8> {
    format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\n\r\n",
        target.path, target.host_header, user_agent
    )
    .into_bytes()
}
