// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::{NoExpand, Regex};

use crate::error::{BundleError, Result};
use crate::{COMMON_FILENAME, COMMON_GUARD};

const RULE: &str = "============================================================================";

lazy_static! {
    static ref NEWLINE_RE: Regex = Regex::new(r"\r\n?").unwrap();
}

/// Where the bundle goes: a path we create, or an already open writer.
enum Output<'a> {
    Path(&'a Path),
    Fd(Box<dyn Write + 'a>),
}

pub struct Bundler<'a> {
    source_filename: &'a Path,
    common_filename: PathBuf,
    output: Output<'a>,
    header_name: &'a str,
    guard_name: &'a str,
}

/// Matches a whole line holding a double-quoted include of `header_name`.
/// Angle-bracket includes of the same name are left alone.
fn include_regex(header_name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?m)^\s*#include\s*"{}".*$"#,
        regex::escape(header_name)
    ))
    .expect("escaped include pattern is always valid")
}

/// The `zcommon.h` sitting next to the running executable, or in the
/// current directory when the executable location is unknown.
pub fn default_common_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(COMMON_FILENAME)))
        .unwrap_or_else(|| PathBuf::from(COMMON_FILENAME))
}

/// Reads a whole text file, reporting a missing file as
/// [`BundleError::FileNotFound`]. CRLF and lone CR line endings come back
/// as LF.
pub fn load_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| BundleError::from_io(path, e))?;
    Ok(NEWLINE_RE.replace_all(&text, "\n").into_owned())
}

/// Replaces every `#include "<header_name>"` line with a comment saying the
/// header now lives inline in the same file.
pub fn strip_local_include(text: &str, header_name: &str) -> String {
    let re = include_regex(header_name);
    let replacement = format!(
        "// [Bundled] \"{}\" is included inline in this same file",
        header_name
    );
    debug!(
        "stripping {} include(s) of \"{}\"",
        re.find_iter(text).count(),
        header_name
    );
    re.replace_all(text, NoExpand(&replacement)).into_owned()
}

/// Wraps the shared header contents in a commented `#ifndef` guard block.
pub fn wrap_guarded(header_content: &str, guard_name: &str) -> String {
    format!(
        "
/* {rule}
   z-libs Common Definitions (Bundled)
   This block is auto-generated. It is guarded so that if you include multiple
   z-libs it is only defined once.
   {rule} */
#ifndef {guard}
#define {guard}

{content}

#endif // {guard}
/* {rule} */
",
        rule = RULE,
        guard = guard_name,
        content = header_content,
    )
}

/// The "generated file" comment placed at the very top of the bundle.
pub fn generated_banner(source_filename: &Path) -> String {
    let basename = source_filename
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    format!(
        "/*
 * GENERATED FILE - DO NOT EDIT DIRECTLY
 * Source: {}
 *
 * This file is part of the z-libs collection: https://github.com/z-libs
 * Licensed under the MIT License.
 */

",
        basename
    )
}

impl<'a> Bundler<'a> {
    pub fn new(source_filename: &'a Path, bundle_filename: &'a Path) -> Bundler<'a> {
        Bundler::with_output(source_filename, Output::Path(bundle_filename))
    }

    /// Like [`Bundler::new`], but writes the bundle to `fd` instead of
    /// creating a file.
    pub fn new_fd(source_filename: &'a Path, fd: Box<dyn Write + 'a>) -> Bundler<'a> {
        Bundler::with_output(source_filename, Output::Fd(fd))
    }

    fn with_output(source_filename: &'a Path, output: Output<'a>) -> Bundler<'a> {
        Bundler {
            source_filename,
            common_filename: default_common_path(),
            output,
            header_name: COMMON_FILENAME,
            guard_name: COMMON_GUARD,
        }
    }

    pub fn common(&mut self, common_filename: &Path) {
        self.common_filename = common_filename.to_path_buf();
    }

    pub fn header_name(&mut self, name: &'a str) {
        self.header_name = name;
    }

    pub fn guard_name(&mut self, name: &'a str) {
        self.guard_name = name;
    }

    /// Builds the full bundle in memory. Both inputs are read before
    /// anything is produced.
    pub fn render(&self) -> Result<String> {
        let source_code = load_text(self.source_filename)?;
        let common_code = load_text(&self.common_filename)?;

        let common_payload = wrap_guarded(&common_code, self.guard_name);
        let processed_source = strip_local_include(&source_code, self.header_name);

        let mut bundle = generated_banner(self.source_filename);
        bundle.push_str(&common_payload);
        bundle.push('\n');
        bundle.push_str(&processed_source);
        Ok(bundle)
    }

    pub fn run(self) -> Result<()> {
        info!(
            "Bundling: source {}, common {}, output {}",
            self.source_filename.display(),
            self.common_filename.display(),
            self.output_name()
        );
        let bundle = self.render()?;
        let output_name = self.output_name();
        match self.output {
            Output::Path(bundle_filename) => {
                if let Some(dir) = bundle_filename
                    .parent()
                    .filter(|d| !d.as_os_str().is_empty())
                {
                    fs::create_dir_all(dir).map_err(|e| BundleError::from_io(dir, e))?;
                }
                fs::write(bundle_filename, bundle)
                    .map_err(|e| BundleError::from_io(bundle_filename, e))?;
            }
            Output::Fd(mut fd) => {
                fd.write_all(bundle.as_bytes())
                    .and_then(|_| fd.flush())
                    .map_err(|e| BundleError::Io {
                        path: PathBuf::from(&output_name),
                        source: e,
                    })?;
            }
        }
        info!("Success! Created {}", output_name);
        Ok(())
    }

    fn output_name(&self) -> String {
        match self.output {
            Output::Path(p) => p.display().to_string(),
            Output::Fd(_) => String::from("<stream>"),
        }
    }
}

/// Bundles `source_filename` with `common_filename` into `bundle_filename`
/// using the default header and guard names.
pub fn bundle(
    source_filename: &Path,
    common_filename: &Path,
    bundle_filename: &Path,
) -> Result<()> {
    let mut bundler = Bundler::new(source_filename, bundle_filename);
    bundler.common(common_filename);
    bundler.run()
}
