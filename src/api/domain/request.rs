use serde::Deserialize;

#[derive(Deserialize)]
pub struct LocalFileRequest {
    #[serde(default)]
    pub path: String,
}

#[derive(Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}
