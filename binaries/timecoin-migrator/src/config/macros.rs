/// Defines a config struct and a `write_docs` function that turns the
/// doc comments of its fields into `##` comments in a [`toml_edit`] document.
///
/// # Attributes
/// - `#[child = true]`: the field is a config struct, its fields get documented too.
/// - `#[comment_out = true]`: the field is written commented out.
///
/// # Invariants
/// - the struct implements [`Default`] and `serde`
/// - no field is an [`Option`], `toml` would skip it
///
/// # Documentation
/// Field docs follow this shape:
///
/// ```text
/// /// BRIEF DESCRIPTION.
/// ///
/// /// Type         | FIELD TYPE
/// /// Valid values | EXPRESSION REPRESENTING VALID VALUES
/// field: (),
/// ```
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[child = $child:literal])?
                $(#[comment_out = $comment_out:literal])?
                $(#[doc = $doc:expr])*
                $(##[$field_meta:meta])*
                $field_vis:vis $field:ident: $field_ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $name {
            /// Write the field docs of this struct into `doc`.
            $vis fn write_docs(doc: &mut dyn ::toml_edit::TableLike) {
                $(
                    let key = stringify!($field);

                    #[allow(unused_mut, clippy::allow_attributes, reason = "only with `comment_out`")]
                    let mut prefix = [$(format!("##{}\n", $doc),)*].concat();

                    $(
                    if $comment_out {
                        prefix.push('#');
                    }
                    )?

                    $(
                    if $child {
                        if let Some(child) = doc.get_mut(key).and_then(::toml_edit::Item::as_table_like_mut) {
                            <$field_ty>::write_docs(child);
                        }
                    }
                    )?

                    if let Some(table) = doc.get_mut(key).and_then(::toml_edit::Item::as_table_mut) {
                        table.decor_mut().set_prefix(format!("\n{prefix}"));
                    } else if let Some(mut key_mut) = doc.key_mut(key) {
                        key_mut.leaf_decor_mut().set_prefix(prefix);
                    }
                )*
            }
        }
    };
}

pub(crate) use config_struct;
