use crate::types::media_file::LoadedFile;

/// Files opened during this run, in load order. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    items: Vec<LoadedFile>,
}

impl FileList {
    pub fn new() -> Self {
        FileList { items: Vec::new() }
    }

    /// Appends the file unless an entry with the same name exists. Returns whether it was added.
    pub fn add(&mut self, file: &LoadedFile) -> bool {
        if self.find_by_filename(&file.name).is_some() {
            return false;
        }
        self.items.push(file.clone());
        true
    }

    pub fn all_items(&self) -> &[LoadedFile] {
        &self.items
    }

    pub fn find_by_filename(&self, name: &str) -> Option<&LoadedFile> {
        self.items.iter().find(|item| item.name == name)
    }
}
