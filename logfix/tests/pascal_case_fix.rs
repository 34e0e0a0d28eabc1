//! Placeholder names rewritten to PascalCase (CA1727)

mod common;

use common::{verify_fix, verify_fix_repeated, verify_no_fix};
use logfix::RuleId;

const RULE: RuleId = RuleId::PlaceholderCasing;

#[test]
fn test_every_placeholder() {
    verify_fix_repeated(
        RULE,
        r#"var type = _logger.GetType();
var ex = new Exception();
_logger.LogInformation({|#0:"Value: {ex} {typeAssemblyEntryPointName} {exGetTypeGetPropertiesGetHashCode} {type}"|}, nameof(ex), type.Assembly.EntryPoint.Name, ex.GetType().GetProperties().GetHashCode(), type);"#,
        4,
        r#"var type = _logger.GetType();
var ex = new Exception();
_logger.LogInformation("Value: {Ex} {TypeAssemblyEntryPointName} {ExGetTypeGetPropertiesGetHashCode} {Type}", nameof(ex), type.Assembly.EntryPoint.Name, ex.GetType().GetProperties().GetHashCode(), type);"#,
    );
}

#[test]
fn test_verbatim_template() {
    verify_fix(
        RULE,
        r#"_logger.LogInformation({|#0:@"Saved {fileName} to C:\{folder}"|}, fileName, folder);"#,
        r#"_logger.LogInformation(@"Saved {FileName} to C:\{Folder}", fileName, folder);"#,
    );
}

#[test]
fn test_template_after_error_argument() {
    verify_fix(
        RULE,
        r#"var ex = new Exception();
_logger.LogError(ex, {|#0:"Failed for {userId,8}"|}, userId);"#,
        r#"var ex = new Exception();
_logger.LogError(ex, "Failed for {UserId,8}", userId);"#,
    );
}

#[test]
fn test_already_pascal_case_declines() {
    verify_no_fix(RULE, r#"_logger.LogInformation({|#0:"Value: {Value}"|}, value);"#);
}
