mod common;

use common::{identity, write_file, ScriptedPrompter, YEAR};
use riotgen::error::Error;
use riotgen::identity::StaticIdentity;
use riotgen::kinds::Kind;
use riotgen::params::ParamValue;
use riotgen::resolver::Resolver;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_missing_input() {
    let prompter = ScriptedPrompter::default();
    let identity = identity();
    let resolver = Resolver::new(&prompter, &identity);

    let err = resolver.resolve(Kind::Board.spec().descriptor, false, None, None).unwrap_err();
    assert!(matches!(err, Error::MissingInput));
}

#[test_log::test]
fn test_interactive_driver() {
    let prompter = ScriptedPrompter::new(&["my_sensor", "", "Sensor brief", "sensors", "periph_i2c", "", ""]);
    let identity = identity();
    let resolver = Resolver::new(&prompter, &identity).with_year(YEAR);

    let context = resolver
        .resolve(Kind::Driver.spec().descriptor, true, None, Some(Path::new("/opt/RIOT")))
        .unwrap();

    let driver = context.group("driver").unwrap();
    assert_eq!(driver.text("name"), Some("my_sensor"));
    assert_eq!(driver.text("displayed_name"), Some("My Sensor"));
    assert_eq!(driver.text("ingroup"), Some("sensors"));
    assert_eq!(driver.get("modules"), Some(&ParamValue::List(vec!["periph_i2c".to_string()])));
    assert_eq!(driver.get("packages"), Some(&ParamValue::List(vec![])));

    let global = context.group("global").unwrap();
    assert_eq!(global.text("license"), Some("LGPLv21"));
    assert_eq!(global.text("author_name"), Some("test_name"));
    assert_eq!(global.text("organization"), Some("test_name"));
    assert_eq!(global.text("year"), Some("2024"));
    assert_eq!(global.text("riotbase"), Some("/opt/RIOT"));

    assert_eq!(prompter.asked()[..4], ["Driver name", "Driver Doxygen group name", "Brief doxygen description", "Parent driver Doxygen group"]);
}

#[test]
fn test_config_values_are_not_prompted() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("test.cfg");
    write_file(
        &config,
        "[test]\nname = foo\nbrief = x\nboard = nrf52dk\nuse_testrunner = y\nmodules = shell\n\
         packages = lwip\nfeatures_required = periph_uart\n\n\
         [global]\nlicense = BSD\nauthor_name = a\nauthor_email = b\norganization = c\nyear = 2019\n",
    );

    let prompter = ScriptedPrompter::default();
    let identity = identity();
    let resolver = Resolver::new(&prompter, &identity).with_year(YEAR);
    let context = resolver.resolve(Kind::Test.spec().descriptor, true, Some(&config), None).unwrap();

    assert!(prompter.asked().is_empty());
    let test = context.group("test").unwrap();
    assert_eq!(test.get("use_testrunner"), Some(&ParamValue::Flag(true)));
    let global = context.group("global").unwrap();
    assert_eq!(global.text("year"), Some("2019"));
    assert_eq!(global.text("riotbase"), Some(""));
}

#[test]
fn test_partial_config_prompts_for_the_rest() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("module.cfg");
    write_file(&config, "[module]\nname = foo\n");

    let prompter = ScriptedPrompter::new(&["", "Foo brief", "", "", "", ""]);
    let identity = identity();
    let resolver = Resolver::new(&prompter, &identity);
    let context = resolver.resolve(Kind::Module.spec().descriptor, true, Some(&config), None).unwrap();

    assert_eq!(prompter.asked()[..2], ["Module Doxygen name", "Brief doxygen description"]);
    let module = context.group("module").unwrap();
    assert_eq!(module.text("displayed_name"), Some("Foo"));
    assert_eq!(module.text("brief"), Some("Foo brief"));
}

#[test]
fn test_config_only_falls_back_to_identity() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("module.cfg");
    write_file(&config, "[module]\nname = foo\nbrief = x\n");

    let prompter = ScriptedPrompter::default();
    let identity = identity();
    let context = Resolver::new(&prompter, &identity)
        .resolve(Kind::Module.spec().descriptor, false, Some(&config), None)
        .unwrap();
    assert_eq!(context.group("global").unwrap().text("author_email"), Some("test_email"));

    let anonymous = StaticIdentity::default();
    let err = Resolver::new(&prompter, &anonymous)
        .resolve(Kind::Module.spec().descriptor, false, Some(&config), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing parameter: author name.");
}

#[test]
fn test_invalid_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("test.cfg");
    write_file(&config, "[test]\nname = foo\nbrief = x\nuse_testrunner = maybe\n");

    let prompter = ScriptedPrompter::default();
    let identity = identity();
    let err = Resolver::new(&prompter, &identity)
        .resolve(Kind::Test.spec().descriptor, false, Some(&config), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value 'maybe' for use testrunner: expected yes or no.");
}

#[test]
fn test_invalid_license() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("module.cfg");
    write_file(&config, "[module]\nname = foo\nbrief = x\n\n[global]\nlicense = GPL\n");

    let prompter = ScriptedPrompter::default();
    let identity = identity();
    let err = Resolver::new(&prompter, &identity)
        .resolve(Kind::Module.spec().descriptor, false, Some(&config), None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref name, ref value, .. } if name == "license" && value == "GPL"));
}

#[test]
fn test_riotbase_from_command_line_wins() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("module.cfg");
    write_file(&config, "[module]\nname = foo\nbrief = x\n\n[global]\nriotbase = /home/user/RIOT\n");

    let prompter = ScriptedPrompter::default();
    let identity = identity();
    let resolver = Resolver::new(&prompter, &identity);

    let context = resolver.resolve(Kind::Module.spec().descriptor, false, Some(&config), None).unwrap();
    assert_eq!(context.group("global").unwrap().text("riotbase"), Some("/home/user/RIOT"));

    let context = resolver
        .resolve(Kind::Module.spec().descriptor, false, Some(&config), Some(Path::new("/opt/RIOT")))
        .unwrap();
    assert_eq!(context.group("global").unwrap().text("riotbase"), Some("/opt/RIOT"));
}
