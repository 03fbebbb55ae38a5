//! Output format plans: which stylesheet produces which kind of output.

use crate::config::FormatOptions;
use crate::resolver::LOCAL_DOCBOOK_XSL_ROOT;
use std::fmt;
use std::str::FromStr;

/// The output formats the DocBook XSL distribution ships stylesheets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFormat {
    Pdf,
    Html,
    HtmlSingle,
    Xhtml,
    XhtmlSingle,
    Eclipse,
    JavaHelp,
    Man,
    Webhelp,
}

impl StandardFormat {
    pub const ALL: [StandardFormat; 9] = [
        StandardFormat::Pdf,
        StandardFormat::Html,
        StandardFormat::HtmlSingle,
        StandardFormat::Xhtml,
        StandardFormat::XhtmlSingle,
        StandardFormat::Eclipse,
        StandardFormat::JavaHelp,
        StandardFormat::Man,
        StandardFormat::Webhelp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StandardFormat::Pdf => "pdf",
            StandardFormat::Html => "html",
            StandardFormat::HtmlSingle => "html_single",
            StandardFormat::Xhtml => "xhtml",
            StandardFormat::XhtmlSingle => "xhtml_single",
            StandardFormat::Eclipse => "eclipse",
            StandardFormat::JavaHelp => "javahelp",
            StandardFormat::Man => "man",
            StandardFormat::Webhelp => "webhelp",
        }
    }

    /// Stylesheet path inside the DocBook XSL distribution.
    fn stylesheet_path(self) -> &'static str {
        match self {
            StandardFormat::Pdf => "fo/docbook.xsl",
            StandardFormat::Html => "html/chunk.xsl",
            StandardFormat::HtmlSingle => "html/docbook.xsl",
            StandardFormat::Xhtml => "xhtml/chunk.xsl",
            StandardFormat::XhtmlSingle => "xhtml/docbook.xsl",
            StandardFormat::Eclipse => "eclipse/eclipse.xsl",
            StandardFormat::JavaHelp => "javahelp/javahelp.xsl",
            StandardFormat::Man => "manpages/docbook.xsl",
            StandardFormat::Webhelp => "webhelp/xsl/webhelp.xsl",
        }
    }

    fn target_extension(self) -> &'static str {
        match self {
            StandardFormat::Pdf => "pdf",
            StandardFormat::Xhtml | StandardFormat::XhtmlSingle => "xhtml",
            StandardFormat::Man => "man",
            _ => "html",
        }
    }

    fn chunked(self) -> bool {
        matches!(
            self,
            StandardFormat::Html
                | StandardFormat::Xhtml
                | StandardFormat::Eclipse
                | StandardFormat::JavaHelp
                | StandardFormat::Webhelp
        )
    }

    fn image_copying_required(self) -> bool {
        !matches!(self, StandardFormat::Pdf | StandardFormat::Man)
    }
}

impl fmt::Display for StandardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardFormat::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Describes how one output format is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPlan {
    name: String,
    target_extension: String,
    stylesheet_resource: String,
    chunked: bool,
    image_copying_required: bool,
}

impl FormatPlan {
    pub fn new(name: impl Into<String>, stylesheet_resource: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_extension: "html".to_string(),
            stylesheet_resource: stylesheet_resource.into(),
            chunked: false,
            image_copying_required: true,
        }
    }

    pub fn standard(format: StandardFormat) -> Self {
        Self {
            name: format.name().to_string(),
            target_extension: format.target_extension().to_string(),
            stylesheet_resource: format!("{LOCAL_DOCBOOK_XSL_ROOT}/{}", format.stylesheet_path()),
            chunked: format.chunked(),
            image_copying_required: format.image_copying_required(),
        }
    }

    /// Layers configured overrides onto this plan.
    pub fn with_options(mut self, options: &FormatOptions) -> Self {
        if let Some(resource) = &options.stylesheet_resource {
            self.stylesheet_resource = resource.clone();
        }
        if let Some(extension) = &options.target_extension {
            self.target_extension = extension.clone();
        }
        if let Some(copy) = options.image_copying_required {
            self.image_copying_required = copy;
        }
        self
    }

    pub fn with_target_extension(mut self, extension: impl Into<String>) -> Self {
        self.target_extension = extension.into();
        self
    }

    pub fn with_chunked(mut self, chunked: bool) -> Self {
        self.chunked = chunked;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_extension(&self) -> &str {
        &self.target_extension
    }

    /// Logical resource name of the stylesheet, resolved via the locator.
    pub fn stylesheet_resource(&self) -> &str {
        &self.stylesheet_resource
    }

    pub fn is_chunked(&self) -> bool {
        self.chunked
    }

    pub fn image_copying_required(&self) -> bool {
        self.image_copying_required
    }
}
