// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

/*!
Bundle a z-libs library header with the shared `zcommon.h` into a single
distributable file.

The shared header is pasted at the top of the output inside an include
guard, so several bundled libraries can be included together, and the
library's own `#include "zcommon.h"` lines are replaced by a comment.

```no_run
use std::path::Path;
use zbundler::Bundler;

let mut bundler = Bundler::new(Path::new("src/zvec_impl.h"), Path::new("dist/zvec.h"));
bundler.common(Path::new("zcommon.h"));
bundler.run().unwrap();
```
*/

mod bundler;
mod error;

pub use bundler::*;
pub use error::{BundleError, Result};

/// Header whose quoted includes get replaced by the bundled copy.
pub const COMMON_FILENAME: &str = "zcommon.h";

/// Macro guarding the bundled copy of the shared header.
pub const COMMON_GUARD: &str = "Z_COMMON_BUNDLED";
