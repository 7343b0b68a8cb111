//! Print surfaces.
//!
//! A surface is an isolated place the finished document is loaded into
//! and printed from. [`print_document`] drives one job: load, print, then
//! tear the surface down whether or not printing succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use docket_core::{event_bus, AppEvent, PrintEvent};

use crate::error::{RenderError, Result};
use crate::page::PrintDocument;

pub trait PrintSurface {
    /// Short name used in logs and events.
    fn name(&self) -> &str;

    /// Loads the document markup.
    fn load(&mut self, html: &str) -> Result<()>;

    /// Prints the loaded document.
    fn print(&mut self) -> Result<()>;

    /// Releases whatever `load` acquired.
    fn teardown(&mut self);
}

/// Runs one print job on `surface`.
pub fn print_document(surface: &mut dyn PrintSurface, document: &PrintDocument) -> Result<()> {
    if document.is_empty() {
        return Err(RenderError::NoPages);
    }

    let result = surface.load(&document.html).and_then(|()| surface.print());
    surface.teardown();

    match &result {
        Ok(()) => {
            tracing::info!("Printed {} pages via {}", document.page_count, surface.name());
            event_bus().publish(AppEvent::Print(PrintEvent::Printed {
                surface: surface.name().to_string(),
            }));
        }
        Err(e) => tracing::error!("Print via {} failed: {}", surface.name(), e),
    }
    result
}

/// Writes the document to an HTML file; opening it in a browser gives the
/// platform print dialog.
#[derive(Debug, Clone)]
pub struct HtmlFileSurface {
    path: PathBuf,
    loaded: Option<String>,
}

impl HtmlFileSurface {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for HtmlFileSurface {
    fn name(&self) -> &str {
        "html-file"
    }

    fn load(&mut self, html: &str) -> Result<()> {
        self.loaded = Some(html.to_string());
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        let html = self.loaded.as_deref().ok_or_else(|| RenderError::Surface {
            reason: "nothing loaded".to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, html)?;
        tracing::debug!("Wrote print document to {}", self.path.display());
        Ok(())
    }

    fn teardown(&mut self) {
        self.loaded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        calls: Vec<&'static str>,
        fail: bool,
    }

    impl PrintSurface for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn load(&mut self, _html: &str) -> Result<()> {
            self.calls.push("load");
            Ok(())
        }

        fn print(&mut self) -> Result<()> {
            self.calls.push("print");
            if self.fail {
                return Err(RenderError::Surface {
                    reason: "printer offline".to_string(),
                });
            }
            Ok(())
        }

        fn teardown(&mut self) {
            self.calls.push("teardown");
        }
    }

    fn document() -> PrintDocument {
        PrintDocument {
            html: "<html></html>".to_string(),
            page_count: 1,
        }
    }

    #[test]
    fn test_surface_torn_down_after_failure() {
        let mut surface = Recording {
            fail: true,
            ..Default::default()
        };
        assert!(print_document(&mut surface, &document()).is_err());
        assert_eq!(surface.calls, vec!["load", "print", "teardown"]);
    }

    #[test]
    fn test_empty_document_is_refused() {
        let mut surface = Recording::default();
        let empty = PrintDocument {
            html: String::new(),
            page_count: 0,
        };
        assert!(matches!(
            print_document(&mut surface, &empty),
            Err(RenderError::NoPages)
        ));
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_html_file_surface_writes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out/print.html");
        let mut surface = HtmlFileSurface::new(&path);
        print_document(&mut surface, &document()).expect("printed");
        assert_eq!(std::fs::read_to_string(&path).expect("written"), "<html></html>");
    }
}
