use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CompileError;

/// Options accepted by [`crate::transform`], usually read from the karma
/// config as `{"presets": ["es2016"]}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    /// Presets to compile with. `None` falls back to [`default_presets`] and
    /// an empty list to the module interop alone; any other list replaces
    /// the default entirely.
    #[serde(default)]
    pub presets: Option<Vec<String>>,
}

impl TransformOptions {
    pub fn with_presets<I, S>(presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            presets: Some(presets.into_iter().map(Into::into).collect()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the configured preset names, in order.
    pub fn resolve_presets(&self) -> Result<Vec<Preset>, CompileError> {
        match &self.presets {
            None => Ok(default_presets()),
            Some(names) if names.is_empty() => Ok(vec![Preset::ModulesCommonJs]),
            Some(names) => names.iter().map(|name| name.parse()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// CommonJS module interop only, no downleveling.
    ModulesCommonJs,
    /// ES2015 downleveling plus the CommonJS module interop.
    Es2015,
    /// Exponentiation operator.
    Es2016,
    /// Async functions.
    Es2017,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::ModulesCommonJs => "modules-commonjs",
            Preset::Es2015 => "es2015",
            Preset::Es2016 => "es2016",
            Preset::Es2017 => "es2017",
        }
    }

    /// Whether this preset rewrites `import`/`export` into `require`/`exports`.
    pub fn applies_module_interop(self) -> bool {
        matches!(self, Preset::ModulesCommonJs | Preset::Es2015)
    }
}

impl FromStr for Preset {
    type Err = CompileError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let short = name
            .strip_prefix("@babel/preset-")
            .or_else(|| name.strip_prefix("babel-preset-"))
            .unwrap_or(name);

        match short {
            "modules-commonjs" | "commonjs" => Ok(Preset::ModulesCommonJs),
            "es2015" => Ok(Preset::Es2015),
            "es2016" => Ok(Preset::Es2016),
            "es2017" => Ok(Preset::Es2017),
            _ => Err(CompileError::UnknownPreset(name.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn default_presets() -> Vec<Preset> {
    vec![Preset::Es2015]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_presets_fall_back_to_es2015() {
        let options = TransformOptions::from_json("{}").unwrap();
        assert_eq!(options.presets, None);
        assert_eq!(options.resolve_presets().unwrap(), vec![Preset::Es2015]);
    }

    #[test]
    fn explicit_presets_replace_default() {
        let options = TransformOptions::from_json(r#"{"presets": ["es2016"]}"#).unwrap();
        assert_eq!(options.resolve_presets().unwrap(), vec![Preset::Es2016]);
    }

    #[test]
    fn explicit_empty_list_means_interop_only() {
        let options = TransformOptions::with_presets(Vec::<String>::new());
        assert_eq!(options.resolve_presets().unwrap(), vec![Preset::ModulesCommonJs]);
    }

    #[test]
    fn presets_keep_their_order() {
        let options = TransformOptions::with_presets(["es2017", "es2015", "es2016"]);
        assert_eq!(
            options.resolve_presets().unwrap(),
            vec![Preset::Es2017, Preset::Es2015, Preset::Es2016]
        );
    }

    #[test]
    fn accepts_babel_package_names() {
        assert_eq!("babel-preset-es2016".parse::<Preset>().unwrap(), Preset::Es2016);
        assert_eq!("@babel/preset-es2015".parse::<Preset>().unwrap(), Preset::Es2015);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let options = TransformOptions::with_presets(["es2015", "react"]);
        match options.resolve_presets() {
            Err(CompileError::UnknownPreset(name)) => assert_eq!(name, "react"),
            other => panic!("expected unknown preset error, got {other:?}"),
        }
    }

    #[test]
    fn only_es2015_and_commonjs_apply_interop() {
        assert!(Preset::Es2015.applies_module_interop());
        assert!(Preset::ModulesCommonJs.applies_module_interop());
        assert_eq!("commonjs".parse::<Preset>().unwrap(), Preset::ModulesCommonJs);
        assert!(!Preset::Es2016.applies_module_interop());
        assert!(!Preset::Es2017.applies_module_interop());
    }
}
