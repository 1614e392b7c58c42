/// Image intake module
///
/// This module handles:
/// - Deciding whether a dropped file is an image
/// - Guessing the MIME type sent along with the upload
/// - Reading image bytes in the background for previews and uploads

pub mod loader;
