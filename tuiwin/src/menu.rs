//! Selectable item list bound to a window.

use thiserror::Error;

use crate::text::{display_width, truncate_to_width};
use crate::types::TextStyle;
use crate::window::Window;

/// Errors reported by [`Menu`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The operation is not allowed while the menu is posted.
    #[error("menu is posted")]
    Posted,
    /// The operation needs a posted menu.
    #[error("menu is not posted")]
    NotPosted,
    /// Navigation past the first or last item.
    #[error("request denied")]
    RequestDenied,
    #[error("item index {index} out of range ({len} items)")]
    OutOfRange { index: usize, len: usize },
}

/// One selectable entry.
///
/// `user` is an opaque back-reference the owner uses to map a selected item
/// back to whatever produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<T> {
    name: String,
    description: String,
    user: Option<T>,
}

impl<T: Copy> MenuItem<T> {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: T) -> Self {
        self.user = Some(user);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn user(&self) -> Option<T> {
        self.user
    }
}

/// Navigation requests accepted by [`Menu::drive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRequest {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

/// A list of [`MenuItem`]s laid out in a window, `rows` by `cols` per page.
///
/// Items can only be replaced while the menu is unposted. Posting draws the
/// current page into the window; refreshing the window is left to the caller.
#[derive(Debug)]
pub struct Menu<T> {
    items: Vec<MenuItem<T>>,
    window: Window,
    rows: u16,
    cols: u16,
    mark: String,
    show_description: bool,
    /// Index of the item under the cursor.
    current: usize,
    /// Index of the first item on the visible page.
    top: usize,
    posted: bool,
}

impl<T: Copy> Menu<T> {
    pub fn new(items: Vec<MenuItem<T>>, window: Window) -> Self {
        Self {
            items,
            rows: window.height().max(1),
            cols: 1,
            window,
            mark: "-".to_string(),
            show_description: true,
            current: 0,
            top: 0,
            posted: false,
        }
    }

    pub fn set_format(&mut self, rows: u16, cols: u16) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self.scroll_to_current();
    }

    pub fn format(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    /// Set the string drawn in front of the current item.
    pub fn set_mark(&mut self, mark: impl Into<String>) {
        self.mark = mark.into();
    }

    pub fn mark(&self) -> &str {
        &self.mark
    }

    pub fn set_show_description(&mut self, show: bool) {
        self.show_description = show;
    }

    pub fn items(&self) -> &[MenuItem<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the items, returning the previous ones.
    ///
    /// The cursor and scroll position reset to the first item.
    pub fn set_items(&mut self, items: Vec<MenuItem<T>>) -> Result<Vec<MenuItem<T>>, MenuError> {
        if self.posted {
            return Err(MenuError::Posted);
        }
        self.current = 0;
        self.top = 0;
        Ok(std::mem::replace(&mut self.items, items))
    }

    pub fn current(&self) -> Option<&MenuItem<T>> {
        self.items.get(self.current)
    }

    pub fn current_index(&self) -> Option<usize> {
        (self.current < self.items.len()).then_some(self.current)
    }

    pub fn set_current(&mut self, index: usize) -> Result<(), MenuError> {
        if index >= self.items.len() {
            return Err(MenuError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.current = index;
        self.scroll_to_current();
        if self.posted {
            self.draw();
        }
        Ok(())
    }

    /// Index of the first item on the visible page.
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn is_posted(&self) -> bool {
        self.posted
    }

    /// Draw the current page into the window.
    pub fn post(&mut self) -> Result<(), MenuError> {
        if self.posted {
            return Err(MenuError::Posted);
        }
        self.posted = true;
        self.draw();
        Ok(())
    }

    /// Erase the menu from its window.
    pub fn unpost(&mut self) -> Result<(), MenuError> {
        if !self.posted {
            return Err(MenuError::NotPosted);
        }
        self.posted = false;
        self.window.clear();
        Ok(())
    }

    pub fn drive(&mut self, request: MenuRequest) -> Result<(), MenuError> {
        let len = self.items.len();
        if len == 0 {
            return Err(MenuError::RequestDenied);
        }
        let cols = self.cols as usize;
        let page = self.page_len();
        let last = len - 1;

        let target = match request {
            MenuRequest::Up => self.current.checked_sub(cols),
            MenuRequest::Down => Some(self.current + cols).filter(|&i| i < len),
            MenuRequest::PageUp => (self.current > 0).then(|| self.current.saturating_sub(page)),
            MenuRequest::PageDown => (self.current < last).then(|| (self.current + page).min(last)),
            MenuRequest::First => (self.current != 0).then_some(0),
            MenuRequest::Last => (self.current != last).then_some(last),
        };
        let Some(target) = target else {
            return Err(MenuError::RequestDenied);
        };

        log::trace!("menu: {:?} moves cursor {} -> {}", request, self.current, target);
        self.current = target;
        self.scroll_to_current();
        if self.posted {
            self.draw();
        }
        Ok(())
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn page_len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    fn scroll_to_current(&mut self) {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        let row = self.current / cols;
        let top_row = self.top / cols;
        if row < top_row {
            self.top = row * cols;
        } else if row >= top_row + rows {
            self.top = (row + 1 - rows) * cols;
        }
    }

    fn draw(&mut self) {
        self.window.clear();

        let cols = self.cols as usize;
        let col_width = self.window.width() / self.cols;
        let blank_mark = " ".repeat(display_width(&self.mark));

        for (index, item) in self
            .items
            .iter()
            .enumerate()
            .skip(self.top)
            .take(self.page_len())
        {
            let slot = index - self.top;
            let row = (slot / cols) as u16;
            let col = (slot % cols) as u16;
            let selected = index == self.current;

            let mut text = if selected {
                self.mark.clone()
            } else {
                blank_mark.clone()
            };
            text.push_str(&item.name);
            if self.show_description && !item.description.is_empty() {
                text.push(' ');
                text.push_str(&item.description);
            }

            let style = if selected {
                TextStyle::new().reverse()
            } else {
                TextStyle::new()
            };
            self.window.move_to(col * col_width, row);
            self.window
                .print_styled(&truncate_to_width(&text, col_width as usize), style);
        }
    }
}
