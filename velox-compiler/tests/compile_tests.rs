use velox_compiler::compile_template;

#[test]
fn compile_collects_handlers_and_errors() {
    let tpl = r#"<form @submit.prevent="save">
  <input @keyup.esc="cancel" @keyup.enter="save">
  <my-button @click.native="reset()"></my-button>
  <p v-if="if">bad</p>
</form>"#;
    let out = compile_template(tpl).expect("compile");
    assert_eq!(out.ast.len(), 1);
    assert_eq!(out.errors.len(), 1);

    let paths: Vec<&str> = out.handlers.iter().map(|h| h.path.as_str()).collect();
    assert_eq!(paths, vec!["form", "form > input", "form > my-button"]);
    assert_eq!(
        out.handlers[0].code,
        r#"on:{"submit":function($event){$event.preventDefault();save($event)}}"#
    );
    assert_eq!(
        out.handlers[1].code,
        r#"on:{"keyup":[function($event){if($event.keyCode!==27)return;cancel($event)},function($event){if($event.keyCode!==13)return;save($event)}]}"#
    );
    assert_eq!(
        out.handlers[2].code,
        r#"nativeOn:{"click":function($event){reset()}}"#
    );
}

#[test]
fn compile_without_bindings() {
    let out = compile_template("<div>plain</div>").expect("compile");
    assert!(out.handlers.is_empty());
    assert!(out.errors.is_empty());
}
