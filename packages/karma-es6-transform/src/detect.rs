use std::fmt;

use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{Visit, VisitWith};

/// The kind of top-level declaration that marks a file as an ES module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSyntaxKind {
    /// `export * from "./foo"`
    ExportAll,
    /// `export default ...`
    ExportDefault,
    /// `export { x }`, `export { x } from "./foo"`, `export const x = 1`
    ExportNamed,
    /// `import foo from "./foo"`
    Import,
}

impl fmt::Display for ModuleSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModuleSyntaxKind::ExportAll => "export-all",
            ModuleSyntaxKind::ExportDefault => "export-default",
            ModuleSyntaxKind::ExportNamed => "export-named",
            ModuleSyntaxKind::Import => "import",
        })
    }
}

/// Classify a single top-level item.
pub fn module_syntax_kind(item: &ModuleItem) -> Option<ModuleSyntaxKind> {
    match item {
        ModuleItem::ModuleDecl(decl) => match decl {
            ModuleDecl::ExportAll(_) => Some(ModuleSyntaxKind::ExportAll),
            ModuleDecl::ExportDefaultDecl(_) | ModuleDecl::ExportDefaultExpr(_) => {
                Some(ModuleSyntaxKind::ExportDefault)
            }
            ModuleDecl::ExportNamed(_) | ModuleDecl::ExportDecl(_) => {
                Some(ModuleSyntaxKind::ExportNamed)
            }
            ModuleDecl::Import(_) => Some(ModuleSyntaxKind::Import),
            _ => None,
        },
        ModuleItem::Stmt(_) => None,
    }
}

/// Read-only visitor over the top-level statement list. Stops at the first
/// qualifying item and never descends into nested code.
#[derive(Debug, Default)]
pub struct ModuleSyntaxDetector {
    pub found: Option<ModuleSyntaxKind>,
}

impl Visit for ModuleSyntaxDetector {
    fn visit_module_items(&mut self, items: &[ModuleItem]) {
        self.found = items.iter().find_map(module_syntax_kind);
    }
}

/// Find the first top-level ES module declaration in `program`, if any.
pub fn find_module_syntax(program: &Program) -> Option<ModuleSyntaxKind> {
    let mut detector = ModuleSyntaxDetector::default();
    program.visit_with(&mut detector);
    detector.found
}

pub fn has_module_syntax(program: &Program) -> bool {
    find_module_syntax(program).is_some()
}
