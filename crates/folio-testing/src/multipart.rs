//! `multipart/form-data` request bodies for upload tests.

use bytes::{BufMut, Bytes, BytesMut};

const BOUNDARY: &str = "folio-test-boundary";

enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

/// Builder for a multipart body.
///
/// ```
/// use folio_testing::multipart::MultipartBody;
///
/// let (content_type, body) = MultipartBody::new()
///     .text("title", "Hello")
///     .file("document", "dummy.pdf", "application/pdf", b"%PDF-1.4\n")
///     .build();
/// assert!(content_type.starts_with("multipart/form-data; boundary="));
/// assert!(!body.is_empty());
/// ```
#[derive(Default)]
pub struct MultipartBody {
    parts: Vec<Part>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(Part::Text {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.parts.push(Part::File {
            name: name.to_owned(),
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            data: data.to_vec(),
        });
        self
    }

    /// Returns the `content-type` header value and the encoded body.
    pub fn build(self) -> (String, Bytes) {
        let mut buf = BytesMut::new();
        for part in self.parts {
            buf.put_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text { name, value } => {
                    buf.put_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    buf.put_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    buf.put_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    buf.put_slice(&data);
                }
            }
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            buf.freeze(),
        )
    }
}

/// Minimal PDF payload used as an uploaded document.
pub fn dummy_pdf() -> &'static [u8] {
    b"%PDF-1.4\n%Dummy PDF file\n"
}
