//! Key-driven browsing of an outline, one level at a time.

use regtree::{LevelView, NodeId, Tree, render_path};
use tuiwin::{Key, MenuRequest, Rect, Window};

use crate::config::BrowserConfig;
use crate::outline::Outline;

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Path line on top, the current level's menu below it.
#[derive(Debug)]
pub struct Browser {
    view: LevelView,
    status: Window,
}

impl Browser {
    pub fn new(outline: Outline, area: Rect, config: &BrowserConfig) -> regtree::Result<Self> {
        let screen = Window::new(area);
        let (top, menu_region) =
            Rect::from_size(area.width, area.height).split_top(config.status_rows);
        let status = screen.derive(top.height, top.width, top.y, top.x);
        let mut view = LevelView::new(outline.tree, outline.root, &screen, menu_region)?;
        view.show()?;

        let mut browser = Self { view, status };
        browser.refresh_path();
        Ok(browser)
    }

    pub fn handle(&mut self, key: Key) -> regtree::Result<Flow> {
        match key {
            Key::Char('q') | Key::Escape => return Ok(Flow::Quit),
            Key::Up | Key::Char('k') => self.navigate(MenuRequest::Up),
            Key::Down | Key::Char('j') => self.navigate(MenuRequest::Down),
            Key::PageUp => self.navigate(MenuRequest::PageUp),
            Key::PageDown => self.navigate(MenuRequest::PageDown),
            Key::Home => self.navigate(MenuRequest::First),
            Key::End => self.navigate(MenuRequest::Last),
            Key::Enter | Key::Right | Key::Char('l') => {
                if !self.view.enter()? {
                    log::trace!("nothing below {:?}", self.view.selected());
                }
            }
            Key::Left | Key::Backspace | Key::Char('h') => {
                if !self.view.leave()? {
                    log::trace!("already at the top level");
                }
            }
            _ => return Ok(Flow::Continue),
        }
        self.refresh_path();
        Ok(Flow::Continue)
    }

    fn navigate(&mut self, request: MenuRequest) {
        self.view.drive(request);
    }

    fn refresh_path(&mut self) {
        render_path(&mut self.status, self.view.tree(), self.view.selected());
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.view.selected()
    }

    pub fn view(&self) -> &LevelView {
        &self.view
    }

    pub fn status(&self) -> &Window {
        &self.status
    }

    /// Windows in drawing order.
    pub fn windows(&self) -> [&Window; 2] {
        [&self.status, self.view.window()]
    }

    /// Whether anything asked for a refresh since the last call.
    pub fn take_refresh(&mut self) -> bool {
        let status = self.status.take_refresh();
        let menu = self.view.window_mut().take_refresh();
        status || menu
    }

    /// Free the view and hand back the emptied tree.
    pub fn close(self) -> Tree {
        self.view.free()
    }
}
