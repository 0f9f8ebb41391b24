//! 开局布局
//!
//! 布局是从名称到 10x9 编码数组的映射，JSON 格式：
//!
//! ```json
//! { "standard": [[21, 22, 25, 24, 27, 24, 25, 22, 21], ...] }
//! ```
//!
//! 引擎本身不做 I/O，布局由调用方通过 [`LayoutSource`] 提供。

use crate::board::{Grid, COLS, ROWS};
use crate::types::{is_valid_code, EMPTY};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 标准开局名称
pub const STANDARD_NAME: &str = "standard";
/// 空棋盘名称
pub const EMPTY_NAME: &str = "empty";

lazy_static! {
    /// 标准开局：第 0 行为黑方底线，第 9 行为红方底线
    pub static ref STANDARD: Grid = [
        [21, 22, 25, 24, 27, 24, 25, 22, 21],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 23, 0, 0, 0, 0, 0, 23, 0],
        [26, 0, 26, 0, 26, 0, 26, 0, 26],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [16, 0, 16, 0, 16, 0, 16, 0, 16],
        [0, 13, 0, 0, 0, 0, 0, 13, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [11, 12, 15, 14, 17, 14, 15, 12, 11],
    ];

    static ref BUILTIN: LayoutBook = {
        let mut book = LayoutBook::default();
        book.insert(STANDARD_NAME, *STANDARD);
        book.insert(EMPTY_NAME, [[EMPTY; COLS]; ROWS]);
        book
    };
}

/// 布局加载错误
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layouts: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layouts: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout {name:?} has {found} {what}, expected {expected}")]
    Shape {
        name: String,
        what: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("layout {name:?} has invalid piece code {code} at row {row}, col {col}")]
    BadCode {
        name: String,
        row: usize,
        col: usize,
        code: u8,
    },
    #[error("unknown layout {0:?}")]
    Unknown(String),
}

/// 布局来源
pub trait LayoutSource {
    /// 按名称获取布局
    fn fetch(&self, name: &str) -> Result<Grid, LayoutError>;
}

/// 命名布局集合
#[derive(Debug, Clone, Default)]
pub struct LayoutBook {
    layouts: HashMap<String, Grid>,
}

impl LayoutBook {
    /// 内置布局（standard、empty）
    pub fn builtin() -> &'static LayoutBook {
        &BUILTIN
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<LayoutBook, LayoutError> {
        let raw: HashMap<String, Vec<Vec<u8>>> = serde_json::from_str(json)?;
        let mut book = LayoutBook::default();
        for (name, rows) in raw {
            let grid = to_grid(&name, &rows)?;
            book.layouts.insert(name, grid);
        }
        Ok(book)
    }

    /// 从 JSON 文件读取
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LayoutBook, LayoutError> {
        let text = fs::read_to_string(path)?;
        LayoutBook::from_json(&text)
    }

    pub fn insert(&mut self, name: &str, grid: Grid) {
        self.layouts.insert(name.to_string(), grid);
    }

    pub fn get(&self, name: &str) -> Option<&Grid> {
        self.layouts.get(name)
    }

    /// 所有布局名称（排序后）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layouts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl LayoutSource for LayoutBook {
    fn fetch(&self, name: &str) -> Result<Grid, LayoutError> {
        self.get(name)
            .copied()
            .ok_or_else(|| LayoutError::Unknown(name.to_string()))
    }
}

/// JSON 布局文件，每次获取时读取
#[derive(Debug, Clone)]
pub struct LayoutFile {
    path: PathBuf,
}

impl LayoutFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        LayoutFile { path: path.into() }
    }
}

impl LayoutSource for LayoutFile {
    fn fetch(&self, name: &str) -> Result<Grid, LayoutError> {
        LayoutBook::from_path(&self.path)?.fetch(name)
    }
}

/// 校验行列数和编码
fn to_grid(name: &str, rows: &[Vec<u8>]) -> Result<Grid, LayoutError> {
    if rows.len() != ROWS {
        return Err(LayoutError::Shape {
            name: name.to_string(),
            what: "rows",
            found: rows.len(),
            expected: ROWS,
        });
    }

    let mut grid = [[EMPTY; COLS]; ROWS];
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != COLS {
            return Err(LayoutError::Shape {
                name: name.to_string(),
                what: "columns",
                found: cells.len(),
                expected: COLS,
            });
        }
        for (col, &code) in cells.iter().enumerate() {
            if !is_valid_code(code) {
                return Err(LayoutError::BadCode {
                    name: name.to_string(),
                    row,
                    col,
                    code,
                });
            }
            grid[row][col] = code;
        }
    }
    Ok(grid)
}
