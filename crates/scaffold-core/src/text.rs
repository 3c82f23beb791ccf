//! Helpers for emitting C source text.

use crate::config::RenderConfig;
use crate::digest::ContentDigest;
use crate::ident::macro_case;

/// Include-guard macro for a generated file name.
///
/// `user.h` with prefix `APP_` becomes `APP_USER_H`.
pub fn include_guard(file_name: &str, config: &RenderConfig) -> String {
    format!("{}{}", config.guard_prefix, macro_case(file_name))
}

/// Make `text` safe to place inside a `/* ... */` comment.
///
/// A `*/` in the input would close the comment early, so it is split
/// into `* /`.
pub fn comment_text(text: &str) -> String {
    text.replace("*/", "* /")
}

/// Generated-file banner, empty when disabled.
///
/// `subject` names what the file was generated from; the digest pins the
/// exact input.
pub fn banner(subject: &str, digest: &ContentDigest, config: &RenderConfig) -> String {
    if !config.banner {
        return String::new();
    }
    format!(
        "/* Generated by scaffold from {}. Do not edit.\n * input digest: sha256:{}\n */\n\n",
        comment_text(subject),
        digest.short()
    )
}
