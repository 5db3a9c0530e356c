/*
puzzles.rs

Copyright 2025 Hervé Quatremain

This file is part of Combolock.

Combolock is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Combolock is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Combolock. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Append generated puzzles to the puzzle collection.
//!
//! The collection is a JSON array, read by the game which indexes the puzzles by position.
//! Existing entries are kept as they are, including fields this generator does not know about.

use log::debug;
use serde_json::Value;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::generator::puzzle::PuzzleData;

/// Object to load and save the puzzle collection.
pub struct SaverPuzzles {
    /// Path to the collection file.
    save_file: PathBuf,

    /// Whether to indent the JSON output.
    pretty: bool,
}

impl SaverPuzzles {
    /// Create a [`SaverPuzzles`] object.
    pub fn new(save_file: PathBuf, pretty: bool) -> Self {
        debug!("Puzzle collection file: {save_file:?}");
        Self { save_file, pretty }
    }

    /// Path to the collection file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the puzzles from the collection file.
    ///
    /// Return an empty list if the file does not exist.
    pub fn get_puzzles(&self) -> Result<Vec<Value>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(Vec::new()),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let puzzles: Vec<Value> = serde_json::from_reader(reader)?;
        Ok(puzzles)
    }

    /// Add the puzzle at the end of the collection and save the collection.
    ///
    /// Return the position of the new puzzle in the collection.
    pub fn append_puzzle(&self, puzzle: &PuzzleData) -> Result<usize, Box<dyn Error>> {
        let mut puzzles: Vec<Value> = self.get_puzzles()?;
        puzzles.push(serde_json::to_value(puzzle)?);

        if let Some(dir) = self.save_file.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &puzzles)?;
        } else {
            serde_json::to_writer(&mut writer, &puzzles)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        debug!("Saved {} puzzles", puzzles.len());
        Ok(puzzles.len() - 1)
    }
}
