/// VQA backend access
///
/// One HTTP POST per question: multipart `image` + `question` in,
/// JSON `{"answer": ...}` out.

pub mod client;

pub use client::VqaClient;
