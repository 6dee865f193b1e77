//! LibXML2 FFI wrapper for XML Schema compilation and validation.
//!
//! No pure Rust crate validates against XSD, so schema handling goes through
//! libxml2 directly. Schemas are compiled from a file path so that
//! `xs:include` and `xs:import` resolve relative to the entry schema, and
//! documents are validated from memory after they were read once by the
//! loader.

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Once};

use libc::{c_char, c_int, c_void};

use crate::error::{LibXml2Error, LibXml2Result};

/// libxml2's initialization functions are not thread-safe, so they run exactly once.
static LIBXML2_INIT: Once = Once::new();

/// Forbid network access while reading instance documents.
const XML_PARSE_NONET: c_int = 1 << 11;

#[repr(C)]
pub struct XmlSchema {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaParserCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaValidCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlDoc {
    _private: [u8; 0],
}

#[cfg_attr(target_os = "windows", link(name = "libxml2"))]
#[cfg_attr(not(target_os = "windows"), link(name = "xml2"))]
unsafe extern "C" {
    pub fn xmlInitParser();
    pub fn xmlInitGlobals();

    // Schema compilation
    pub fn xmlSchemaNewParserCtxt(url: *const c_char) -> *mut XmlSchemaParserCtxt;
    pub fn xmlSchemaNewMemParserCtxt(
        buffer: *const c_char,
        size: c_int,
    ) -> *mut XmlSchemaParserCtxt;
    pub fn xmlSchemaSetParserStructuredErrors(
        ctxt: *mut XmlSchemaParserCtxt,
        serror: XmlStructuredErrorFunc,
        ctx: *mut c_void,
    );
    pub fn xmlSchemaParse(ctxt: *const XmlSchemaParserCtxt) -> *mut XmlSchema;
    pub fn xmlSchemaFreeParserCtxt(ctxt: *mut XmlSchemaParserCtxt);
    pub fn xmlSchemaFree(schema: *mut XmlSchema);

    // Instance documents
    pub fn xmlReadMemory(
        buffer: *const c_char,
        size: c_int,
        url: *const c_char,
        encoding: *const c_char,
        options: c_int,
    ) -> *mut XmlDoc;
    pub fn xmlFreeDoc(doc: *mut XmlDoc);

    // Validation
    pub fn xmlSchemaNewValidCtxt(schema: *const XmlSchema) -> *mut XmlSchemaValidCtxt;
    pub fn xmlSchemaFreeValidCtxt(ctxt: *mut XmlSchemaValidCtxt);
    pub fn xmlSchemaSetValidStructuredErrors(
        ctxt: *mut XmlSchemaValidCtxt,
        serror: XmlStructuredErrorFunc,
        ctx: *mut c_void,
    );
    pub fn xmlSchemaValidateDoc(ctxt: *const XmlSchemaValidCtxt, doc: *mut XmlDoc) -> c_int;
}

#[repr(C)]
pub struct xmlError {
    pub domain: c_int,
    pub code: c_int,
    pub message: *const c_char,
    pub level: c_int,
    pub file: *const c_char,
    pub line: c_int,
    pub str1: *const c_char,
    pub str2: *const c_char,
    pub str3: *const c_char,
    pub int1: c_int,
    pub int2: c_int,
    pub ctxt: *mut c_void,
    pub node: *mut c_void,
}

pub type XmlStructuredErrorFunc =
    Option<unsafe extern "C" fn(user_data: *mut c_void, error: *mut xmlError)>;

/// Collects libxml2 diagnostics into the `Vec<String>` behind `user_data`.
unsafe extern "C" fn structured_error_callback(user_data: *mut c_void, error: *mut xmlError) {
    if user_data.is_null() || error.is_null() {
        return;
    }
    let errors = unsafe { &mut *(user_data as *mut Vec<String>) };

    let (msg_ptr, line) = unsafe { ((*error).message, (*error).line) };
    if msg_ptr.is_null() {
        return;
    }

    let message = unsafe { CStr::from_ptr(msg_ptr) }.to_string_lossy();
    let message = message.trim();
    if line > 0 {
        errors.push(format!("line {}: {}", line, message));
    } else {
        errors.push(message.to_string());
    }
}

/// Reference-counted handle to a compiled schema, freed when the last clone drops.
#[derive(Debug)]
pub struct XmlSchemaPtr {
    inner: Arc<XmlSchemaInner>,
}

#[derive(Debug)]
struct XmlSchemaInner {
    ptr: *mut XmlSchema,
    _phantom: PhantomData<XmlSchema>,
}

// Safety: compiled xmlSchema structures are read-only during validation.
unsafe impl Send for XmlSchemaInner {}
unsafe impl Sync for XmlSchemaInner {}

impl XmlSchemaPtr {
    /// # Safety
    ///
    /// `ptr` must come from `xmlSchemaParse` and must not be freed elsewhere.
    unsafe fn from_raw(ptr: *mut XmlSchema, errors: Vec<String>) -> LibXml2Result<Self> {
        if ptr.is_null() {
            return Err(LibXml2Error::SchemaParseFailed { errors });
        }

        Ok(XmlSchemaPtr {
            inner: Arc::new(XmlSchemaInner {
                ptr,
                _phantom: PhantomData,
            }),
        })
    }

    pub(crate) fn as_ptr(&self) -> *const XmlSchema {
        self.inner.ptr
    }

    /// True when both handles refer to the same compiled schema.
    pub fn same_schema(&self, other: &XmlSchemaPtr) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_valid(&self) -> bool {
        !self.inner.ptr.is_null()
    }
}

impl Clone for XmlSchemaPtr {
    fn clone(&self) -> Self {
        XmlSchemaPtr {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Drop for XmlSchemaInner {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                xmlSchemaFree(self.ptr);
            }
            self.ptr = std::ptr::null_mut();
        }
    }
}

/// Validation result from libxml2
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Return code 0
    Valid,
    /// Return code > 0, with the collected diagnostics
    Invalid {
        error_count: i32,
        errors: Vec<String>,
    },
    /// Return code < 0
    InternalError { code: i32 },
}

impl ValidationResult {
    pub fn from_code(code: c_int, errors: Vec<String>) -> Self {
        match code {
            0 => ValidationResult::Valid,
            n if n > 0 => ValidationResult::Invalid {
                error_count: n,
                errors,
            },
            n => ValidationResult::InternalError { code: n },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationResult::Invalid { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationResult::InternalError { .. })
    }
}

/// Safe entry point to libxml2 schema compilation and validation.
///
/// Creating a wrapper initializes libxml2 on first use. Compiling schemas is
/// not thread-safe in libxml2 and goes through the schema cache, which
/// compiles each schema once. Validation creates its own context per call.
pub struct LibXml2Wrapper {
    _phantom: PhantomData<()>,
}

impl LibXml2Wrapper {
    pub fn new() -> Self {
        LIBXML2_INIT.call_once(|| unsafe {
            xmlInitParser();
            xmlInitGlobals();
        });

        LibXml2Wrapper {
            _phantom: PhantomData,
        }
    }

    /// Compile the XSD at `path`. Included and imported schema documents are
    /// resolved relative to it.
    ///
    /// # Errors
    ///
    /// `InvalidPath` when the path is not valid UTF-8 or contains a NUL byte,
    /// `SchemaParseFailed` with every diagnostic libxml2 reported otherwise.
    pub fn parse_schema_file(&self, path: &Path) -> LibXml2Result<XmlSchemaPtr> {
        let c_path = path_to_cstring(path)?;

        unsafe {
            let parser_ctxt = xmlSchemaNewParserCtxt(c_path.as_ptr());
            if parser_ctxt.is_null() {
                return Err(LibXml2Error::ParserContextFailed {
                    path: path.to_path_buf(),
                });
            }

            Self::compile(parser_ctxt)
        }
    }

    /// Compile a self-contained XSD held in memory.
    pub fn parse_schema_from_memory(&self, schema_data: &[u8]) -> LibXml2Result<XmlSchemaPtr> {
        let size = c_int::try_from(schema_data.len()).map_err(|_| {
            LibXml2Error::SchemaParseFailed {
                errors: vec!["schema buffer too large".to_string()],
            }
        })?;

        unsafe {
            let parser_ctxt =
                xmlSchemaNewMemParserCtxt(schema_data.as_ptr() as *const c_char, size);
            if parser_ctxt.is_null() {
                return Err(LibXml2Error::SchemaParseFailed {
                    errors: vec!["empty or unreadable schema buffer".to_string()],
                });
            }

            Self::compile(parser_ctxt)
        }
    }

    /// # Safety
    ///
    /// `parser_ctxt` must be a live parser context; it is freed here.
    unsafe fn compile(parser_ctxt: *mut XmlSchemaParserCtxt) -> LibXml2Result<XmlSchemaPtr> {
        let mut errors: Vec<String> = Vec::new();
        let errors_ptr = &mut errors as *mut Vec<String> as *mut c_void;

        unsafe {
            xmlSchemaSetParserStructuredErrors(
                parser_ctxt,
                Some(structured_error_callback),
                errors_ptr,
            );

            let schema_ptr = xmlSchemaParse(parser_ctxt);
            xmlSchemaFreeParserCtxt(parser_ctxt);

            XmlSchemaPtr::from_raw(schema_ptr, errors)
        }
    }

    /// Validate an in-memory document against a compiled schema.
    ///
    /// `document` names the source in diagnostics.
    ///
    /// # Errors
    ///
    /// `DocumentReadFailed` when libxml2 cannot parse the bytes,
    /// `ValidationContextFailed` when no context can be allocated and
    /// `ValidationFailed` for negative (internal) return codes. Schema
    /// violations are reported as [`ValidationResult::Invalid`].
    pub fn validate_memory(
        &self,
        schema: &XmlSchemaPtr,
        xml_content: &[u8],
        document: &str,
    ) -> LibXml2Result<ValidationResult> {
        let size = c_int::try_from(xml_content.len()).map_err(|_| {
            LibXml2Error::DocumentReadFailed {
                document: document.to_string(),
            }
        })?;
        let c_name = CString::new(document).unwrap_or_default();

        unsafe {
            let doc = xmlReadMemory(
                xml_content.as_ptr() as *const c_char,
                size,
                c_name.as_ptr(),
                std::ptr::null(),
                XML_PARSE_NONET,
            );
            if doc.is_null() {
                return Err(LibXml2Error::DocumentReadFailed {
                    document: document.to_string(),
                });
            }

            let valid_ctxt = xmlSchemaNewValidCtxt(schema.as_ptr());
            if valid_ctxt.is_null() {
                xmlFreeDoc(doc);
                return Err(LibXml2Error::ValidationContextFailed);
            }

            let mut errors: Vec<String> = Vec::new();
            let errors_ptr = &mut errors as *mut Vec<String> as *mut c_void;
            xmlSchemaSetValidStructuredErrors(
                valid_ctxt,
                Some(structured_error_callback),
                errors_ptr,
            );

            let result_code = xmlSchemaValidateDoc(valid_ctxt, doc);

            xmlSchemaFreeValidCtxt(valid_ctxt);
            xmlFreeDoc(doc);

            match ValidationResult::from_code(result_code, errors) {
                ValidationResult::InternalError { code } => Err(LibXml2Error::ValidationFailed {
                    code,
                    document: document.to_string(),
                }),
                result => Ok(result),
            }
        }
    }
}

impl Default for LibXml2Wrapper {
    fn default() -> Self {
        Self::new()
    }
}

fn path_to_cstring(path: &Path) -> LibXml2Result<CString> {
    path.to_str()
        .and_then(|s| CString::new(s).ok())
        .ok_or_else(|| LibXml2Error::InvalidPath {
            path: path.to_path_buf(),
        })
}
