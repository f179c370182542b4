//! Scripted walkthrough of the typed form API
//!
//! Each step records what happened in the [`Console`]: snapshots of form
//! values, operations that were allowed, and operations the form rejected.

use crate::state::{
    map_shape, CompositeShape, Console, EditableField, FormCollection, FormGroup, FormResult,
    FormValue, Recipe, ScalarKind, Shape, Shaped, TypedForm, ValueSchema,
};
use serde_json::{json, Value};

/// Optional member of the login form
pub const TWO_FACTOR: &str = "twoFactor";

/// Code used when the optional member is added
const TWO_FACTOR_CODE: &str = "000000";

/// `email` and `password` are required, `twoFactor` is optional
pub fn login_shape() -> Shape {
    CompositeShape::new()
        .field("email", Shape::text())
        .field("password", Shape::text())
        .optional(TWO_FACTOR, Shape::text())
        .build()
}

pub fn new_login_form() -> FormResult<FormGroup> {
    FormGroup::from_shape(&login_shape(), Some(&json!({"email": "", "password": ""})))
}

/// Add the optional two-factor member
pub fn add_two_factor(login: &mut FormGroup, console: &mut Console) {
    let result = login
        .create_control(TWO_FACTOR, Some(&json!(TWO_FACTOR_CODE)))
        .and_then(|control| login.add_control(TWO_FACTOR, control));
    console.record(format!("login.add_control('{TWO_FACTOR}')"), result);
    console.snapshot("login.value", &login.value());
}

/// Remove the optional two-factor member
pub fn remove_two_factor(login: &mut FormGroup, console: &mut Console) {
    let result = login.remove_control(TWO_FACTOR);
    console.record(format!("login.remove_control('{TWO_FACTOR}')"), result);
    console.snapshot("login.value", &login.value());
}

/// Try to remove a required member; always rejected
pub fn remove_required(login: &mut FormGroup, console: &mut Console, name: &str) {
    let result = login.remove_control(name);
    console.record(format!("login.remove_control('{name}')"), result);
}

/// Set the full value with only the required members. Allowed while
/// `twoFactor` is absent, rejected once it has been added.
pub fn set_credentials(login: &mut FormGroup, console: &mut Console, email: &str, password: &str) {
    let value = json!({"email": email, "password": password});
    let result = login.set_value(&value);
    console.record(format!("login.set_value({value})"), result);
    console.snapshot("login.value", &login.value());
}

pub fn reset_login(login: &mut FormGroup, console: &mut Console, value: Option<&Value>) {
    let action = match value {
        Some(v) => format!("login.reset({v})"),
        None => "login.reset()".to_string(),
    };
    let result = login.reset(value);
    console.record(action, result);
    console.snapshot("login.value", &login.value());
}

/// Run the full walkthrough and return the login form for interactive use.
///
/// Rejections the walkthrough expects are recorded, not returned; an `Err`
/// means a step that should have worked did not.
pub fn run_script(console: &mut Console) -> FormResult<FormGroup> {
    inferred_group(console)?;
    let login = login_group(console)?;
    keyed_collection(console)?;
    typed_recipe(console)?;
    nested_fields(console)?;
    scalar_control(console)?;
    Ok(login)
}

/// A group inferred from initial values has no optional members
fn inferred_group(console: &mut Console) -> FormResult<()> {
    let initial = json!({"id": 0, "name": "test"});
    let mut group = FormGroup::from_values(&initial)?;
    console.info(format!("group inferred from {initial}"));
    console.snapshot("group.value", &group.value());

    let result = group.remove_control("name");
    console.record("group.remove_control('name')", result);
    console.snapshot("group.value", &group.value());

    // Replacing a required member is fine; it never goes absent
    let renamed = group.create_control("name", Some(&json!("renamed")))?;
    let result = group.set_control("name", renamed);
    console.record("group.set_control('name')", result);
    console.snapshot("group.value", &group.value());
    Ok(())
}

fn login_group(console: &mut Console) -> FormResult<FormGroup> {
    let mut login = new_login_form()?;
    console.info("login form: email, password, optional twoFactor");
    console.snapshot("login.value", &login.value());

    add_two_factor(&mut login, console);
    remove_two_factor(&mut login, console);

    set_credentials(&mut login, console, "ada@example.com", "hunter2");
    let with_absent = json!({
        "email": "ada@example.com",
        "password": "hunter2",
        TWO_FACTOR: TWO_FACTOR_CODE,
    });
    let result = login.set_value(&with_absent);
    console.record(format!("login.set_value({with_absent})"), result);

    remove_required(&mut login, console, "email");

    reset_login(&mut login, console, None);
    reset_login(
        &mut login,
        console,
        Some(&json!({"email": "grace@example.com", "password": ""})),
    );
    reset_login(&mut login, console, None);
    Ok(login)
}

/// Keyed entries in a collection can come and go freely
fn keyed_collection(console: &mut Console) -> FormResult<()> {
    let mut flags = FormCollection::new(map_shape(&Shape::boolean()));
    for key in ["foo", "bar"] {
        let entry = flags.create_entry(Some(&json!(true)))?;
        let result = flags.add_control(key, entry);
        console.record(format!("flags.add_control('{key}')"), result);
    }
    console.snapshot("flags.value", &flags.value());

    let removed = flags.remove_control("foo");
    console.info(format!(
        "flags.remove_control('foo') removed {}",
        if removed.is_some() { "an entry" } else { "nothing" }
    ));
    console.snapshot("flags.value", &flags.value());

    let off = flags.create_entry(Some(&json!(false)))?;
    let result = flags.set_control("baz", off);
    console.record("flags.set_control('baz')", result);
    console.info(format!("flags.values() = {}", Value::Array(flags.values())));
    Ok(())
}

/// Shapes derived from Rust types work the same way
fn typed_recipe(console: &mut Console) -> FormResult<()> {
    let mut recipe = TypedForm::new(&Recipe::sample())?;
    console.snapshot("recipe.value", &recipe.value());

    if let Some(ingredients) = recipe
        .group_mut()
        .get_mut("ingredients")
        .and_then(EditableField::as_collection_mut)
    {
        let salt = ingredients.create_entry(Some(&json!({"name": "salt", "amount": "a pinch"})))?;
        let key = ingredients.push(salt);
        console.record("recipe.ingredients.push(salt)", key);
    }
    console.snapshot("recipe.value.ingredients", &recipe.value()["ingredients"]);

    let result = recipe.patch_value(&json!({"cookingTime": "soon"}));
    console.record("recipe.patch_value({\"cookingTime\":\"soon\"})", result);

    // The sample has two ingredients, the form now holds three
    let result = recipe.set_value(&Recipe::sample());
    console.record("recipe.set_value(Recipe::sample())", result);
    let result = recipe.reset();
    console.record("recipe.reset()", result);
    console.snapshot("recipe.value", &recipe.value());
    Ok(())
}

/// Any field tree can be walked and edited by dotted path
fn nested_fields(console: &mut Console) -> FormResult<()> {
    let pancakes = json!({
        "name": "Pancakes",
        "author": "Grace",
        "isVegan": false,
        "ingredients": [
            {"name": "flour", "amount": 200},
            {"name": "milk", "amount": "a cup"},
        ],
        "cookingTime": 15,
    });
    let mut recipe = map_shape(&Recipe::shape()).instantiate(Some(&pancakes))?;

    if let Some(amount) = recipe.get_mut("ingredients.1.amount")? {
        let result = amount.set_value(&json!(250));
        console.record("recipe.get('ingredients.1.amount').set_value(250)", result);
    }
    if let Some(name) = recipe.get("ingredients.0.name")? {
        console.snapshot("recipe.get('ingredients.0.name')", &name.value());
    }
    let result = recipe.get("name.first").map(|_| ());
    console.record("recipe.get('name.first')", result);

    let result = recipe.patch_value(&json!({"cookingTime": 20}));
    console.record("recipe.patch_value({\"cookingTime\":20})", result);
    console.snapshot("recipe.value", &recipe.value());

    let result = recipe.reset(None);
    console.record("recipe.reset()", result);
    console.snapshot("recipe.value", &recipe.value());
    Ok(())
}

/// A lone value control checks every write against its kind
fn scalar_control(console: &mut Console) -> FormResult<()> {
    let schema = ValueSchema {
        kind: ScalarKind::Number,
        nullable: false,
    };
    let mut servings = FormValue::new(schema, json!(2))?;

    let result = servings.set(&json!("four"));
    console.record("servings.set(\"four\")", result);
    let result = servings.set(&json!(4));
    console.record("servings.set(4)", result);
    console.snapshot("servings.value", servings.value());

    let result = servings.reset(None);
    console.record("servings.reset()", result);
    console.info(format!(
        "servings.value = {}, initial {}",
        servings.value(),
        servings.initial()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Outcome;
    use pretty_assertions::assert_eq;

    fn outcomes(console: &Console) -> Vec<(Outcome, &str)> {
        console
            .entries()
            .iter()
            .filter(|e| e.outcome != Outcome::Info)
            .map(|e| (e.outcome, e.message.as_str()))
            .collect()
    }

    #[test]
    fn test_script_runs_and_returns_reset_login() {
        let mut console = Console::new(false);
        let login = run_script(&mut console).unwrap();
        assert_eq!(login.value(), json!({"email": "", "password": ""}));
        assert!(!console.is_empty());
    }

    #[test]
    fn test_script_outcomes() {
        let mut console = Console::new(false);
        run_script(&mut console).unwrap();
        let rejected: Vec<&str> = outcomes(&console)
            .into_iter()
            .filter(|(o, _)| *o == Outcome::Rejected)
            .map(|(_, m)| m)
            .collect();

        assert_eq!(rejected.len(), 7);
        assert!(rejected[0].starts_with("group.remove_control('name'): IllegalRemoval"));
        assert!(rejected[1].starts_with("login.set_value("));
        assert!(rejected[1].contains("ShapeMismatch"));
        assert!(rejected[2].starts_with("login.remove_control('email'): IllegalRemoval"));
        assert!(rejected[3].contains("ScalarMismatch"));
        assert!(rejected[4].starts_with("recipe.set_value(Recipe::sample()): ShapeMismatch"));
        assert!(rejected[5].starts_with("recipe.get('name.first'): NotAContainer"));
        assert!(rejected[6].starts_with("servings.set(\"four\"): ScalarMismatch"));
    }

    #[test]
    fn test_script_logs_collection_snapshots() {
        let mut console = Console::new(false);
        run_script(&mut console).unwrap();
        let messages: Vec<_> = console.entries().iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&r#"flags.value = {"foo":true,"bar":true}"#));
        assert!(messages.contains(&r#"flags.value = {"bar":true}"#));
        assert!(messages.contains(&"flags.values() = [true,false]"));
        assert!(messages.contains(&r#"group.value = {"id":0,"name":"renamed"}"#));
    }

    #[test]
    fn test_script_walks_nested_paths() {
        let mut console = Console::new(false);
        run_script(&mut console).unwrap();
        let messages: Vec<_> = console.entries().iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&r#"recipe.get('ingredients.0.name') = "flour""#));
        assert!(messages.contains(&"recipe.get('ingredients.1.amount').set_value(250)"));
        assert!(messages.contains(&"servings.value = 4"));
        assert!(messages.contains(&"servings.value = 2, initial 2"));
    }

    mod interactive {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_and_remove_two_factor() {
            let mut console = Console::new(false);
            let mut login = new_login_form().unwrap();

            add_two_factor(&mut login, &mut console);
            assert!(login.contains(TWO_FACTOR));
            add_two_factor(&mut login, &mut console);
            assert_eq!(console.entries()[2].outcome, Outcome::Rejected);

            remove_two_factor(&mut login, &mut console);
            assert!(!login.contains(TWO_FACTOR));
        }

        #[test]
        fn test_set_credentials_depends_on_presence() {
            let mut console = Console::new(false);
            let mut login = new_login_form().unwrap();

            set_credentials(&mut login, &mut console, "a@b.c", "pw");
            assert_eq!(console.entries()[0].outcome, Outcome::Allowed);

            add_two_factor(&mut login, &mut console);
            set_credentials(&mut login, &mut console, "x@y.z", "pw2");
            let last_op = console
                .entries()
                .iter()
                .rev()
                .find(|e| e.outcome != Outcome::Info)
                .unwrap();
            assert_eq!(last_op.outcome, Outcome::Rejected);
            assert_eq!(login.value()["email"], json!("a@b.c"));
        }

        #[test]
        fn test_remove_required_is_rejected() {
            let mut console = Console::new(false);
            let mut login = new_login_form().unwrap();
            remove_required(&mut login, &mut console, "password");
            assert_eq!(console.entries()[0].outcome, Outcome::Rejected);
            assert!(login.contains("password"));
        }

        #[test]
        fn test_reset_restores_empty_credentials() {
            let mut console = Console::new(false);
            let mut login = new_login_form().unwrap();
            set_credentials(&mut login, &mut console, "a@b.c", "pw");
            reset_login(&mut login, &mut console, None);
            assert_eq!(login.value(), json!({"email": "", "password": ""}));
        }
    }
}
