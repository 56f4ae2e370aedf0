//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

/// Failure modes for loading, normalizing, and rendering benchmark data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: malformed load factor cell: {cell:?}")]
    BadAlpha { line: usize, cell: String },
    #[error("line {line}: row carries no load factor and none precedes it")]
    MissingAlpha { line: usize },
    #[error("line {line}: malformed timing cell: {cell:?}")]
    BadTiming { line: usize, cell: String },
    #[error("unknown operation label: {0:?}")]
    UnknownLabel(String),
    #[error("line {line}: expected {expected} columns after the load factor")]
    ShortRow { line: usize, expected: usize },
    #[error("input contained no benchmark rows")]
    EmptyInput,
    #[error("no samples for {method}: {label}")]
    EmptySelection { method: String, label: String },
    #[error("plot error: {0}")]
    Plot(String),
}
