use std::path::{Path, PathBuf};

/// Directory that every relative asset path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoot {
    root: PathBuf,
}

impl ResourceRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `relative` onto the root. Absolute paths are returned unchanged.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.root.join(relative)
        }
    }
}

impl Default for ResourceRoot {
    fn default() -> Self {
        Self::new("resources")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths() {
        let root = ResourceRoot::new("/data/res");
        assert_eq!(
            root.resolve("textures/grass.png"),
            PathBuf::from("/data/res/textures/grass.png")
        );
    }

    #[test]
    fn keeps_absolute_paths() {
        let root = ResourceRoot::default();
        assert_eq!(root.resolve("/tmp/x.png"), PathBuf::from("/tmp/x.png"));
    }
}
