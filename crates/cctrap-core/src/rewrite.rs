//! Rebuilds an intercepted compiler invocation as a single shell command line.
//!
//! The build hands the trap an argv that its own shell has already split. Most
//! tokens survive being pasted back into a command string unchanged, with one
//! known exception: the compiler-identification define
//! `-D__LIBUKLIBID_COMPILER__=<name> <version>` arrives as a single token whose
//! embedded space is no longer protected by quotes. Pasting it back verbatim
//! would let the second shell split it again, so its value is re-quoted.
//!
//! While walking the tokens the first existing `.c` argument is remembered as
//! the translation unit being compiled.
//!
//! Tokens are handled as [`OsStr`] throughout. A file name that is not valid
//! UTF-8 reaches the compiler and the results log byte for byte.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Define whose value is re-quoted before re-invocation.
pub const LIBUKLIBID_COMPILER_PREFIX: &str = "-D__LIBUKLIBID_COMPILER__=";

const SOURCE_SUFFIX: &str = ".c";

/// Answers whether a candidate source token names something on disk.
pub trait SourceProbe {
    fn exists(&self, path: &OsStr) -> bool;
}

/// Probes the real filesystem. Directories count as existing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl SourceProbe for FsProbe {
    fn exists(&self, path: &OsStr) -> bool {
        Path::new(path).exists()
    }
}

impl<F> SourceProbe for F
where
    F: Fn(&OsStr) -> bool,
{
    fn exists(&self, path: &OsStr) -> bool {
        self(path)
    }
}

/// Command line handed to the host shell.
///
/// Always starts with the host compiler followed by a space, and every
/// forwarded token is followed by exactly one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyCommand(OsString);

impl ProxyCommand {
    fn new(host_compiler: &str) -> Self {
        let mut command = OsString::with_capacity(host_compiler.len() + 1);
        command.push(host_compiler);
        command.push(" ");
        Self(command)
    }

    fn push_token(&mut self, token: &OsStr) {
        self.0.push(token);
        self.0.push(" ");
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }

    pub fn into_os_string(self) -> OsString {
        self.0
    }

    /// Text form for diagnostics. Invalid UTF-8 shows as U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }
}

impl fmt::Display for ProxyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string_lossy())
    }
}

impl AsRef<OsStr> for ProxyCommand {
    fn as_ref(&self) -> &OsStr {
        &self.0
    }
}

/// Outcome of rewriting one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub command: ProxyCommand,
    pub source_file: Option<OsString>,
}

/// Textual source-file test: more than two bytes and a literal `.c` ending.
///
/// No path awareness. `dir.c/` style oddities are not special-cased.
pub fn is_source_candidate(token: &OsStr) -> bool {
    let bytes = token.as_encoded_bytes();
    bytes.len() > SOURCE_SUFFIX.len() && bytes.ends_with(SOURCE_SUFFIX.as_bytes())
}

/// Re-quotes the value of a compiler-identification define.
///
/// The trailing space inside the quotes keeps the separator that the
/// build's shell consumed when it turned `"Clang 14.0"` into one argv entry.
/// Returns `None` for tokens that do not carry the prefix.
pub fn requote_compiler_define(token: &OsStr) -> Option<OsString> {
    let value = token
        .as_encoded_bytes()
        .strip_prefix(LIBUKLIBID_COMPILER_PREFIX.as_bytes())?;
    // SAFETY: `value` starts right after a non-empty ASCII prefix of a valid
    // `OsStr`, which is a permitted split point for encoded bytes.
    let value = unsafe { OsStr::from_encoded_bytes_unchecked(value) };

    let mut requoted = OsString::from(LIBUKLIBID_COMPILER_PREFIX);
    requoted.push("\"");
    requoted.push(value);
    requoted.push(" \"");
    Some(requoted)
}

/// Builds the proxy command for `tokens` and picks out the source file.
///
/// `tokens` excludes the program name. Token order is preserved exactly and
/// only compiler-identification defines are altered. The first existing
/// `.c` token wins; later ones are still forwarded but not recorded.
pub fn rewrite<I, T, P>(tokens: I, host_compiler: &str, probe: &P) -> Rewrite
where
    I: IntoIterator<Item = T>,
    T: AsRef<OsStr>,
    P: SourceProbe + ?Sized,
{
    let mut command = ProxyCommand::new(host_compiler);
    let mut source_file: Option<OsString> = None;

    for token in tokens {
        let token = token.as_ref();

        if let Some(requoted) = requote_compiler_define(token) {
            debug!(
                token = %token.to_string_lossy(),
                requoted = %requoted.to_string_lossy(),
                "re-quoted compiler define"
            );
            command.push_token(&requoted);
            continue;
        }

        if source_file.is_none() && is_source_candidate(token) && probe.exists(token) {
            debug!(source = %token.to_string_lossy(), "found source file");
            source_file = Some(token.to_os_string());
        }

        command.push_token(token);
    }

    Rewrite {
        command,
        source_file,
    }
}
