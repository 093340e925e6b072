//! Toolchain configuration.
//!
//! Commands and fixed flags for every external tool. Defaults match a
//! standard install with `csmith`, `clang++` and the ll2w tools on `PATH`.

use smithy_case::Language;

/// Default foreign target for IR lowering. Independent of the host so the IR
/// reflects the architecture the bytecode eventually runs on.
pub const DEFAULT_TARGET_TRIPLE: &str = "mips64el-linux-gnu";

/// Language standard used for both native compilation and IR lowering.
pub const DEFAULT_STD: &str = "--std=c++20";

/// Commands and flags for the external tools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Random program generator.
    pub generator: String,
    /// Native compiler, also used for IR emission.
    pub cxx: String,
    /// Language standard flag.
    pub std: String,
    /// Target triple for IR lowering.
    pub target_triple: String,
    /// IR-to-bytecode translator.
    pub translator: String,
    /// Translator flag requesting a runnable module instead of a fragment.
    pub runnable_flag: String,
    /// Bytecode assembler.
    pub assembler: String,
    /// Bytecode linker.
    pub linker: String,
    /// Optional VM used to execute the linked module.
    pub vm: Option<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            generator: "csmith".to_string(),
            cxx: "clang++".to_string(),
            std: DEFAULT_STD.to_string(),
            target_triple: DEFAULT_TARGET_TRIPLE.to_string(),
            translator: "ll2w".to_string(),
            runnable_flag: "-x".to_string(),
            assembler: "wasmc".to_string(),
            linker: "wld".to_string(),
            vm: None,
        }
    }
}

impl ToolchainConfig {
    /// Create default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generator command.
    #[must_use]
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Set the native compiler command (e.g., clang++, clang++-20).
    #[must_use]
    pub fn with_cxx(mut self, cxx: impl Into<String>) -> Self {
        self.cxx = cxx.into();
        self
    }

    /// Set the language standard flag.
    #[must_use]
    pub fn with_std(mut self, std: impl Into<String>) -> Self {
        self.std = std.into();
        self
    }

    /// Set the foreign target triple for IR lowering.
    #[must_use]
    pub fn with_target_triple(mut self, triple: impl Into<String>) -> Self {
        self.target_triple = triple.into();
        self
    }

    /// Set the translator command.
    #[must_use]
    pub fn with_translator(mut self, translator: impl Into<String>) -> Self {
        self.translator = translator.into();
        self
    }

    /// Set the assembler command.
    #[must_use]
    pub fn with_assembler(mut self, assembler: impl Into<String>) -> Self {
        self.assembler = assembler.into();
        self
    }

    /// Set the linker command.
    #[must_use]
    pub fn with_linker(mut self, linker: impl Into<String>) -> Self {
        self.linker = linker.into();
        self
    }

    /// Set the VM used to run linked modules.
    #[must_use]
    pub fn with_vm(mut self, vm: Option<String>) -> Self {
        self.vm = vm;
        self
    }

    /// Generator flags for a language.
    #[must_use]
    pub const fn generator_flags(lang: Language) -> &'static [&'static str] {
        match lang {
            Language::Cpp => &["--lang-cpp", "--cpp11"],
            Language::C => &[],
        }
    }

    /// Flags shared by native compilation and IR lowering.
    #[must_use]
    pub fn common_flags(&self) -> [&str; 2] {
        [self.std.as_str(), "-Wno-everything"]
    }

    /// Flags for IR emission, excluding optimization flags.
    ///
    /// `-disable-O0-optnone` keeps clang from tagging functions `optnone`,
    /// so the requested optimization flags still apply downstream.
    #[must_use]
    pub fn ir_flags(&self) -> Vec<String> {
        vec![
            format!("--target={}", self.target_triple),
            "-S".to_string(),
            "-emit-llvm".to_string(),
            "-Xclang".to_string(),
            "-disable-O0-optnone".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_flags() {
        assert_eq!(
            ToolchainConfig::generator_flags(Language::Cpp),
            ["--lang-cpp", "--cpp11"]
        );
        assert!(ToolchainConfig::generator_flags(Language::C).is_empty());
    }

    #[test]
    fn test_ir_flags_target_foreign_triple() {
        let config = ToolchainConfig::new().with_target_triple("wasm32-unknown-unknown");
        let flags = config.ir_flags();
        assert_eq!(flags[0], "--target=wasm32-unknown-unknown");
        assert!(flags.iter().any(|f| f == "-emit-llvm"));
        assert!(flags.iter().any(|f| f == "-disable-O0-optnone"));
    }

    #[test]
    fn test_builder() {
        let config = ToolchainConfig::new()
            .with_cxx("clang++-20")
            .with_vm(Some("why".to_string()));
        assert_eq!(config.cxx, "clang++-20");
        assert_eq!(config.vm.as_deref(), Some("why"));
        assert_eq!(config.common_flags(), ["--std=c++20", "-Wno-everything"]);
    }
}
