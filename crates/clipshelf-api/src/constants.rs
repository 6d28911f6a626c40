//! API constants

/// Landing page, embedded at build time.
pub const INDEX_HTML: &str = include_str!("../static/index.html");

/// Script loaded by the landing page.
pub const APP_JS: &str = include_str!("../static/js/app.js");
