#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
    chunk_size: Option<usize>,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file, chunk_size: None }
    }

    pub fn whole(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Whole, file)
    }

    pub fn fragmented(name: &'static str, file: TestFile, chunk_size: usize) -> Self {
        Self { chunk_size: Some(chunk_size), ..Self::new(name, TestGroup::Fragmented, file) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn file_name(&self) -> &'static str {
        self.file().file_name
    }

    /// Splits the file content into the chunks the decoder is fed with.
    ///
    /// Whole cases yield a single chunk.
    pub fn chunks(&self) -> Vec<&'static [u8]> {
        let content = self.file.content().as_bytes();
        match self.chunk_size {
            Some(size) => content.chunks(size).collect(),
            None => vec![content],
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Whole,
    Fragmented,
}
