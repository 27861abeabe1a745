//! Template rendering glue
//!
//! The store hands a drained message collection plus its level tag to a
//! [`TemplateRenderer`]. The default [`TeraRenderer`] ships an embedded
//! template: a container div tagged with the level, a single paragraph for
//! one message, an unordered list for several. Every message value passes
//! through the registered [`Translator`] and HTML auto-escaping.

use crate::error::FlashError;
use crate::levels::Level;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera, Value};

/// Text translation hook applied to each rendered message.
///
/// The default is the identity; applications plug their localization
/// catalog in through [`TeraRenderer::with_translator`].
pub trait Translator: Send + Sync {
	fn translate(&self, text: &str) -> String;
}

/// Translator that returns the text unchanged.
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
	fn translate(&self, text: &str) -> String {
		text.to_string()
	}
}

/// Renders a message collection plus a level tag into markup.
pub trait TemplateRenderer: Send + Sync {
	fn render(
		&self,
		template: &str,
		messages: &[String],
		level: &Level,
	) -> Result<String, FlashError>;
}

const DEFAULT_TEMPLATE_SOURCE: &str = "\
<div class=\"{{ type }}\">
{%- if messages | length == 1 %}
	<p>{{ messages | first | trans }}</p>
{%- else %}
	<ul>
	{%- for message in messages %}
		<li>{{ message | trans }}</li>
	{%- endfor %}
	</ul>
{%- endif %}
</div>
";

/// Tera-backed renderer with the embedded `default` template.
pub struct TeraRenderer {
	tera: Tera,
}

impl TeraRenderer {
	/// Create a renderer with the identity translator.
	pub fn new() -> Result<Self, FlashError> {
		Self::with_translator(Arc::new(IdentityTranslator))
	}

	/// Create a renderer that pipes every message through `translator`.
	pub fn with_translator(translator: Arc<dyn Translator>) -> Result<Self, FlashError> {
		let mut tera = Tera::default();
		tera.autoescape_on(vec![""]);
		tera.add_raw_template(crate::config::DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_SOURCE)?;
		tera.register_filter(
			"trans",
			move |value: &Value, _args: &HashMap<String, Value>| {
				let text = value
					.as_str()
					.ok_or_else(|| tera::Error::msg("trans filter expects a string"))?;
				Ok(Value::String(translator.translate(text)))
			},
		);
		Ok(Self { tera })
	}

	/// Register an additional named template.
	///
	/// Templates referenced from
	/// [`FlashConfig::templates`](crate::config::FlashConfig) must be
	/// registered here before rendering.
	pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), FlashError> {
		self.tera.add_raw_template(name, source)?;
		Ok(())
	}
}

impl TemplateRenderer for TeraRenderer {
	fn render(
		&self,
		template: &str,
		messages: &[String],
		level: &Level,
	) -> Result<String, FlashError> {
		let mut context = Context::new();
		context.insert("type", level.as_str());
		context.insert("messages", messages);
		Ok(self.tera.render(template, &context)?)
	}
}
