// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BundleError {
    /// Wraps an I/O error, mapping `NotFound` to [`BundleError::FileNotFound`].
    pub fn from_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            BundleError::FileNotFound { path }
        } else {
            BundleError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;
