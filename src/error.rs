use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SerdeError {
    #[error(transparent)]
    JsonWithPath(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// An error loading an OpenAPI document.
#[derive(Debug, miette::Diagnostic, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse OpenAPI document")]
    Syntax(#[source] SerdeError),
    #[error("document doesn't match the OpenAPI schema")]
    Shape(#[source] SerdeError),
    #[error("external reference `{0}` isn't supported")]
    #[diagnostic(help("only references into the same document (`#/...`) are resolved"))]
    ExternalRef(String),
    #[error("reference `{0}` doesn't point to anything in the document")]
    DanglingRef(String),
    #[error("reference `{0}` is part of a cycle")]
    #[diagnostic(help("self-referential schemas can't be expanded into inline types"))]
    CyclicRef(String),
}

/// An error in the generation configuration.
#[derive(Debug, miette::Diagnostic, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file `{}`", .0.display())]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config file `{}`", .0.display())]
    Parse(PathBuf, #[source] SerdeError),
    #[error("unsupported config file version {0}")]
    #[diagnostic(help("the only supported version is 1"))]
    UnsupportedVersion(u32),
    #[error("invalid glob pattern `{0}`")]
    BadPattern(String, #[source] glob::PatternError),
}

/// An error printing generated TypeScript.
#[derive(Debug, miette::Diagnostic, thiserror::Error)]
pub enum EmitError {
    #[error("failed to emit TypeScript")]
    Write(#[from] std::io::Error),
    #[error("emitted TypeScript isn't valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
