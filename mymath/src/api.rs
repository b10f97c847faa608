// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

//! Function table generated from the C declarations in `mymath-sys`.
//!
//! Unlike [`crate::MymathModule`], every declared function is required: a
//! module missing one of them fails to load.

use std::{path::Path, sync::Arc};

use dlopen2::wrapper::{Container, WrapperApi};
use tracing::debug;

use crate::{LoadOptions, Result};
use mymath_proc_macro::mymath_dlopen2_api;

mymath_dlopen2_api!();

pub type MymathApiHandle = Arc<Container<MymathApi>>;

/// Load the module and resolve its whole API. Any runtime the module links
/// against must already be open with global visibility.
///
/// The module is bound immediately, so unresolved dependencies fail here
/// rather than on the first call.
pub fn load_api(path_to_so_file: impl AsRef<Path>) -> Result<MymathApiHandle> {
    let path = path_to_so_file.as_ref();
    let api = unsafe {
        Container::load_with_flags(path.as_os_str(), Some(LoadOptions::MODULE.flags()))
    }?;
    debug!(library = %path.display(), "loaded mymath API table");
    Ok(Arc::new(api))
}
