//! The upload/input surface: decodes one submission (optional file, optional
//! pasted text, optional desired industry) and resolves it to the text that
//! will be analyzed.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::analysis::industries::is_known_industry;
use crate::errors::AppError;

/// File extensions the picker accepts. Only `.txt` content is ever read;
/// the other formats are accepted but never parsed (see `PLACEHOLDER_CV`).
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Substituted verbatim when a non-text file arrives without pasted text.
/// Document parsing is deliberately out of scope; this keeps the flow
/// producing a result for PDF/Word uploads. Swapping this for real parsing
/// is a product decision, not a cleanup.
pub const PLACEHOLDER_CV: &str = "\
Sample CV (demo substitute for an unparsed document):
Name: Alex Tran
Experience: 2 years as a Frontend Developer (ReactJS).
Skills: JavaScript, TypeScript, Tailwind CSS, HTML5.
Education: BSc in Computer Science, Hanoi University of Science and Technology.
Objective: Seeking a dynamic environment with room to grow.";

/// One file part of a submission, as received.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// MIME sniffing is limited to plain text: a declared `text/plain`
    /// content type or a `.txt` extension.
    pub fn is_plain_text(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/plain"))
            || self.extension().as_deref() == Some("txt")
    }
}

/// One analyze submission: zero or one file, optional pasted text, optional
/// desired-industry label. Nothing here outlives the request.
#[derive(Debug, Default)]
pub struct Submission {
    pub text: Option<String>,
    pub file: Option<UploadedFile>,
    pub desired_industry: Option<String>,
}

impl Submission {
    /// Decodes the `file` / `text` / `industry` multipart fields. Rejects
    /// unsupported file extensions and industry labels outside the fixed
    /// list; unrecognized field names are ignored.
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut submission = Submission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart form data: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read uploaded file: {e}"))
                    })?;
                    // A file input with nothing selected arrives as an empty part
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let file = UploadedFile {
                        filename,
                        content_type,
                        bytes,
                    };
                    if !file
                        .extension()
                        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
                    {
                        return Err(AppError::Validation(format!(
                            "Unsupported file type '{}': accepted extensions are .pdf, .doc, .docx, .txt",
                            file.filename
                        )));
                    }
                    submission.file = Some(file);
                }
                "text" => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read text field: {e}"))
                    })?;
                    if !text.trim().is_empty() {
                        submission.text = Some(text);
                    }
                }
                "industry" => {
                    let label = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read industry field: {e}"))
                    })?;
                    let label = label.trim();
                    if label.is_empty() {
                        continue;
                    }
                    if !is_known_industry(label) {
                        return Err(AppError::Validation(format!(
                            "Unknown industry label: '{label}'"
                        )));
                    }
                    submission.desired_industry = Some(label.to_string());
                }
                _ => {}
            }
        }

        Ok(submission)
    }

    /// Resolves the submission to the text to analyze:
    /// 1. a plain-text file's content, verbatim;
    /// 2. otherwise the pasted text;
    /// 3. otherwise, for a non-text file, the fixed placeholder;
    /// 4. otherwise `MissingInput` — and no model call is made.
    pub fn resolve_content(&self) -> Result<String, AppError> {
        if let Some(file) = self.file.as_ref().filter(|f| f.is_plain_text()) {
            return Ok(String::from_utf8_lossy(&file.bytes).into_owned());
        }
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if self.file.is_some() {
            return Ok(PLACEHOLDER_CV.to_string());
        }
        Err(AppError::MissingInput)
    }
}
