
// struct to handle file buffers


use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::PathBuf;
use log::{debug, error};

pub struct FileBufferHelper<'a> {
    pub path: &'a PathBuf,
    pub buffer_reader: BufReader<File>,
    pub line: String
}

impl<'a> FileBufferHelper<'a> {
    pub fn new(file: &'a PathBuf) -> Result<FileBufferHelper<'a>, String> {
        // initialise instance of FileBufferHelper
        match File::open(file) {
            Ok(file_open) => {
                debug!("FileHelper created for: {:?}", file);
                Ok(Self {
                    path: file,
                    buffer_reader: BufReader::new(file_open),
                    line: String::new(),
                })
            },
            Err(x) => {
                error!("File {:?} could not be opened - {}", file, x);
                Err(format!("File {:?} could not be opened - {}", file, x))
            }
        }
    }

    pub fn buffer_reset(&mut self) {
        // reset buffer to position 0
        self.buffer_reader.seek(SeekFrom::Start(0)).expect("Unable to reset buffer");
    }
}
