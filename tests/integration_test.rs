//! Integration tests for manifest generation
//!
//! These tests build synthetic build trees with `.vcxproj.filters` files and
//! run the whole pipeline against them.

use filtergen::pipeline::{self, Mode, ProjectStatus, RunOptions};
use filtergen::{GenerateError, GeneratorConfig};
use std::fs;
use std::path::{Path, PathBuf};

const CORE_FILTERS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="4.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup>
    <Filter Include="Source Files">
      <UniqueIdentifier>{4FC737F1-C7A5-4376-A066-2A32D752A2FF}</UniqueIdentifier>
    </Filter>
    <Filter Include="Source Files\Math" />
  </ItemGroup>
  <ItemGroup>
    <ClCompile Include="C:\Work\Engine\Core\Source\Math\BsVector3.cpp">
      <Filter>Source Files\Math</Filter>
    </ClCompile>
    <ClCompile Include="C:\Work\Engine\Core\Source\Math\BsMatrix4.cpp">
      <Filter>Source Files\Math</Filter>
    </ClCompile>
  </ItemGroup>
  <ItemGroup>
    <ClInclude Include="C:\Work\Engine\Core\Include\BsCorePrerequisites.h" />
  </ItemGroup>
</Project>
"#;

const EXPECTED_CORE: &str = "\
# Generated by filtergen from BansheeCore.vcxproj.filters. Do not edit.

set(BS_BANSHEECORE_INC_NOFILTER
\t\"Include/BsCorePrerequisites.h\"
)

set(BS_BANSHEECORE_SRC_MATH
\t\"Source/Math/BsVector3.cpp\"
\t\"Source/Math/BsMatrix4.cpp\"
)

source_group(\"Header Files\" FILES ${BS_BANSHEECORE_INC_NOFILTER})
source_group(\"Source Files\\\\Math\" FILES ${BS_BANSHEECORE_SRC_MATH})

set(BS_BANSHEECORE_SRC
\t${BS_BANSHEECORE_INC_NOFILTER}
\t${BS_BANSHEECORE_SRC_MATH}
)
";

fn quiet() -> RunOptions {
    RunOptions {
        quiet: true,
        ..RunOptions::default()
    }
}

fn write_filters(root: &Path, rel: &str, body: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, body).unwrap();
    path
}

fn output_of(root: &Path, project: &str) -> PathBuf {
    GeneratorConfig::default().output_path(root, project)
}

#[test]
fn test_generates_expected_manifest() {
    let tree = tempfile::tempdir().unwrap();
    write_filters(
        tree.path(),
        "Build/VS2015/BansheeCore.vcxproj.filters",
        CORE_FILTERS,
    );

    let summary = pipeline::run(tree.path(), &GeneratorConfig::default(), &quiet()).unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.count(ProjectStatus::Written), 1);

    let text = fs::read_to_string(output_of(tree.path(), "BansheeCore")).unwrap();
    assert_eq!(text, EXPECTED_CORE);
}

#[test]
fn test_second_run_is_byte_identical() {
    let tree = tempfile::tempdir().unwrap();
    write_filters(tree.path(), "BansheeCore.vcxproj.filters", CORE_FILTERS);
    let config = GeneratorConfig::default();

    pipeline::run(tree.path(), &config, &quiet()).unwrap();
    let first = fs::read(output_of(tree.path(), "BansheeCore")).unwrap();

    let summary = pipeline::run(tree.path(), &config, &quiet()).unwrap();
    let second = fs::read(output_of(tree.path(), "BansheeCore")).unwrap();

    assert_eq!(first, second);
    assert_eq!(summary.count(ProjectStatus::Unchanged), 1);
}

#[test]
fn test_output_independent_of_element_order() {
    let forward = r#"<Project><ItemGroup>
        <ClCompile Include="Source\b\B.cpp"><Filter>Source Files\Beta</Filter></ClCompile>
        <ClCompile Include="Source\a\A.cpp"><Filter>Source Files\Alpha</Filter></ClCompile>
        <ClInclude Include="Include\A.h"><Filter>Header Files\Alpha</Filter></ClInclude>
    </ItemGroup></Project>"#;
    let backward = r#"<Project>
        <ItemGroup>
          <ClInclude Include="Include\A.h"><Filter>Header Files\Alpha</Filter></ClInclude>
        </ItemGroup>
        <ItemGroup>
          <ClCompile Include="Source\a\A.cpp"><Filter>Source Files\Alpha</Filter></ClCompile>
          <ClCompile Include="Source\b\B.cpp"><Filter>Source Files\Beta</Filter></ClCompile>
        </ItemGroup>
    </Project>"#;

    let one = tempfile::tempdir().unwrap();
    let two = tempfile::tempdir().unwrap();
    write_filters(one.path(), "Proj.vcxproj.filters", forward);
    write_filters(two.path(), "Proj.vcxproj.filters", backward);

    let config = GeneratorConfig::default();
    pipeline::run(one.path(), &config, &quiet()).unwrap();
    pipeline::run(two.path(), &config, &quiet()).unwrap();

    let a = fs::read_to_string(output_of(one.path(), "Proj")).unwrap();
    let b = fs::read_to_string(output_of(two.path(), "Proj")).unwrap();
    assert_eq!(a, b);
    assert!(a.find("SRC_ALPHA").unwrap() < a.find("SRC_BETA").unwrap());
}

#[test]
fn test_every_item_listed_once() {
    let tree = tempfile::tempdir().unwrap();
    write_filters(tree.path(), "BansheeCore.vcxproj.filters", CORE_FILTERS);
    pipeline::run(tree.path(), &GeneratorConfig::default(), &quiet()).unwrap();

    let text = fs::read_to_string(output_of(tree.path(), "BansheeCore")).unwrap();
    for file in [
        "Source/Math/BsVector3.cpp",
        "Source/Math/BsMatrix4.cpp",
        "Include/BsCorePrerequisites.h",
    ] {
        assert_eq!(text.matches(&format!("\"{}\"", file)).count(), 1, "{file}");
    }
}

#[test]
fn test_malformed_project_does_not_stop_others() {
    let tree = tempfile::tempdir().unwrap();
    write_filters(tree.path(), "A/Broken.vcxproj.filters", "<Project><ItemGroup>");
    write_filters(tree.path(), "B/BansheeCore.vcxproj.filters", CORE_FILTERS);
    write_filters(tree.path(), "C/Empty.vcxproj.filters", "<Project />");

    let summary = pipeline::run(tree.path(), &GeneratorConfig::default(), &quiet()).unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.failures.len(), 1);
    let failure = &summary.failures[0];
    assert_eq!(failure.project, "Broken");
    assert!(failure.manifest.ends_with("Broken.vcxproj.filters"));
    assert!(matches!(
        failure.error,
        GenerateError::MalformedManifest { .. }
    ));

    assert_eq!(summary.reports.len(), 2);
    assert!(output_of(tree.path(), "BansheeCore").exists());
    assert!(output_of(tree.path(), "Empty").exists());
    assert!(!output_of(tree.path(), "Broken").exists());
}

#[test]
fn test_collision_fails_only_that_project() {
    let tree = tempfile::tempdir().unwrap();
    write_filters(
        tree.path(),
        "Clash.vcxproj.filters",
        r#"<Project><ItemGroup>
            <ClCompile Include="Source\x.cpp"><Filter>Source Files\A_B</Filter></ClCompile>
            <ClCompile Include="Source\y.cpp"><Filter>Source Files\A\B</Filter></ClCompile>
        </ItemGroup></Project>"#,
    );
    write_filters(tree.path(), "BansheeCore.vcxproj.filters", CORE_FILTERS);

    let summary = pipeline::run(tree.path(), &GeneratorConfig::default(), &quiet()).unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].error.kind(), "IdentifierCollision");
    assert!(!output_of(tree.path(), "Clash").exists());
    assert!(output_of(tree.path(), "BansheeCore").exists());
}

#[test]
fn test_missing_root_aborts() {
    let tree = tempfile::tempdir().unwrap();
    let missing = tree.path().join("nowhere");

    let err = pipeline::run(&missing, &GeneratorConfig::default(), &quiet()).unwrap_err();
    let err = err.downcast_ref::<GenerateError>().expect("GenerateError");
    assert!(matches!(err, GenerateError::RootNotFound(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_check_mode_reports_stale_output() {
    let tree = tempfile::tempdir().unwrap();
    let filters = write_filters(tree.path(), "BansheeCore.vcxproj.filters", CORE_FILTERS);
    let config = GeneratorConfig::default();
    let check = RunOptions {
        mode: Mode::Check,
        quiet: true,
        verbose: false,
    };

    pipeline::run(tree.path(), &config, &quiet()).unwrap();
    assert!(pipeline::run(tree.path(), &config, &check).unwrap().is_success());

    fs::write(&filters, CORE_FILTERS.replace("BsMatrix4", "BsMatrix3")).unwrap();
    let summary = pipeline::run(tree.path(), &config, &check).unwrap();
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].error.kind(), "OutdatedOutput");
}

#[test]
fn test_config_changes_prefix_and_layout() {
    let tree = tempfile::tempdir().unwrap();
    write_filters(tree.path(), "BansheeCore.vcxproj.filters", CORE_FILTERS);
    fs::write(
        tree.path().join("filtergen.toml"),
        "ident_prefix = \"GAME_\"\nsource_root = \"src\"\noutput_file = \"Sources.cmake\"\n",
    )
    .unwrap();

    let config = filtergen::config::load_config(tree.path(), None).unwrap();
    pipeline::run(tree.path(), &config, &quiet()).unwrap();

    let out = tree.path().join("src/BansheeCore/Sources.cmake");
    let text = fs::read_to_string(out).unwrap();
    assert!(text.contains("set(GAME_BANSHEECORE_SRC_MATH"));
    assert!(text.contains("set(GAME_BANSHEECORE_SRC\n"));
}
