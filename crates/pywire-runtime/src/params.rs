//! Initialization parameters crossing the C ABI.
//!
//! `InitParams` mirrors the ctypes struct the host binding passes by
//! value; field order and types are fixed by that contract. Validation
//! copies everything into an owned `ShellOptions` before the event loop
//! ever sees it.

use std::ffi::CStr;
use std::os::raw::c_char;

use pywire_common::{Result, RuntimeError};

use crate::state::EventCallback;

/// Title used when the host passes a null title pointer.
const DEFAULT_TITLE: &str = "PyWire Shell";
/// Page loaded when the host passes a null url pointer.
const BLANK_URL: &str = "about:blank";

/// Parameters for `pw_start_app`, passed by value from the host.
#[repr(C)]
pub struct InitParams {
    pub title: *const c_char,
    pub url: *const c_char,
    pub width: u32,
    pub height: i32,
    pub on_event: Option<EventCallback>,
}

/// Owned, validated session options.
#[derive(Debug, Clone)]
pub(crate) struct ShellOptions {
    pub title: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub on_event: Option<EventCallback>,
}

impl ShellOptions {
    /// Validate raw init params and copy them into owned options.
    ///
    /// Null `title`/`url` fall back to defaults; non-UTF-8 text and
    /// degenerate dimensions are rejected.
    ///
    /// # Safety
    ///
    /// Non-null pointers must point to valid null-terminated C strings
    /// that outlive this call.
    pub unsafe fn from_params(params: &InitParams) -> Result<Self> {
        let title = text_param(params.title, "title")?.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let url = text_param(params.url, "url")?.unwrap_or_else(|| BLANK_URL.to_string());

        if params.width == 0 {
            return Err(RuntimeError::InvalidParameter(
                "width must be non-zero".into(),
            ));
        }
        if params.height <= 0 {
            return Err(RuntimeError::InvalidParameter(
                "height must be positive".into(),
            ));
        }

        Ok(Self {
            title,
            url,
            width: params.width,
            height: params.height as u32,
            on_event: params.on_event,
        })
    }
}

/// Read an optional text parameter. Null is `None`; non-UTF-8 is an error.
unsafe fn text_param(ptr: *const c_char, name: &str) -> Result<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Ok(Some(s.to_string())),
        Err(_) => Err(RuntimeError::InvalidParameter(format!(
            "{name} is not valid UTF-8"
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use std::ffi::CString;
    use std::ptr;

    use super::*;

    fn params(
        title: Option<&CString>,
        url: Option<&CString>,
        width: u32,
        height: i32,
    ) -> InitParams {
        InitParams {
            title: title.map_or(ptr::null(), |t| t.as_ptr()),
            url: url.map_or(ptr::null(), |u| u.as_ptr()),
            width,
            height,
            on_event: None,
        }
    }

    #[test]
    fn valid_params_are_copied() {
        let title = CString::new("Demo").unwrap();
        let url = CString::new("http://127.0.0.1:17181").unwrap();
        let opts =
            unsafe { ShellOptions::from_params(&params(Some(&title), Some(&url), 800, 600)) }
                .unwrap();

        assert_eq!(opts.title, "Demo");
        assert_eq!(opts.url, "http://127.0.0.1:17181");
        assert_eq!(opts.width, 800);
        assert_eq!(opts.height, 600);
        assert!(opts.on_event.is_none());
    }

    #[test]
    fn null_title_falls_back_to_default() {
        let opts =
            unsafe { ShellOptions::from_params(&params(None, None, 800, 600)) }.unwrap();
        assert_eq!(opts.title, "PyWire Shell");
    }

    #[test]
    fn null_url_falls_back_to_blank_page() {
        let opts =
            unsafe { ShellOptions::from_params(&params(None, None, 800, 600)) }.unwrap();
        assert_eq!(opts.url, "about:blank");
    }

    #[test]
    fn unicode_title_is_preserved() {
        let title = CString::new("Démo 日本語 🚀").unwrap();
        let opts =
            unsafe { ShellOptions::from_params(&params(Some(&title), None, 800, 600)) }.unwrap();
        assert_eq!(opts.title, "Démo 日本語 🚀");
    }

    #[test]
    fn non_utf8_title_is_rejected() {
        let bogus = CString::new(vec![0xff, 0xfe, 0xfd]).unwrap();
        let err = unsafe { ShellOptions::from_params(&params(Some(&bogus), None, 800, 600)) }
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidParameter(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn zero_width_is_rejected() {
        let err =
            unsafe { ShellOptions::from_params(&params(None, None, 0, 600)) }.unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidParameter(_)));
    }

    #[test]
    fn non_positive_height_is_rejected() {
        for height in [0, -1, -600] {
            let err = unsafe { ShellOptions::from_params(&params(None, None, 800, height)) }
                .unwrap_err();
            assert!(matches!(err, RuntimeError::InvalidParameter(_)));
        }
    }
}
