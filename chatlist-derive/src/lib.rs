use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Attribute macro that derives all required traits for message types.
///
/// This is syntax sugar that expands to:
/// ```ignore
/// #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, ChatMessage)]
/// ```
///
/// # Example
///
/// ```ignore
/// use chatlist_core::{chat_message, MessageId, User};
///
/// #[chat_message]
/// struct Bubble {
///     #[chat(id)]
///     key: MessageId,
///     #[chat(author)]
///     sender: Option<User>,
///     body: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn chat_message(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let output = quote! {
        #[derive(
            ::std::fmt::Debug,
            ::std::clone::Clone,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::chatlist_core::ChatMessage
        )]
        #input
    };

    output.into()
}

/// Derive macro for the ChatMessage trait.
///
/// Generates `id()` and `author()` from two fields of a named struct. Either
/// field may be wrapped in `Option`.
///
/// # Attributes
///
/// - `#[chat(id)]` - The `MessageId` field. Defaults to a field named `id` or `_id`.
/// - `#[chat(author)]` - The `User` field. Defaults to a field named `user` or `author`.
#[proc_macro_derive(ChatMessage, attributes(chat))]
pub fn derive_chat_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_chat_message_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_chat_message_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "ChatMessage can only be derived for structs with named fields",
            ));
        }
    };

    let id_field = find_field(fields, Role::Id, &["id", "_id"])
        .ok_or_else(|| syn::Error::new_spanned(input, "ChatMessage needs a #[chat(id)] field"))?;
    let author_field = find_field(fields, Role::Author, &["user", "author"]).ok_or_else(|| {
        syn::Error::new_spanned(input, "ChatMessage needs a #[chat(author)] field")
    })?;

    let id_expr = field_access(id_field);
    let author_expr = field_access(author_field);

    Ok(quote! {
        impl #impl_generics ::chatlist_core::ChatMessage for #name #ty_generics #where_clause {
            fn id(&self) -> ::std::option::Option<&::chatlist_core::MessageId> {
                #id_expr
            }

            fn author(&self) -> ::std::option::Option<&::chatlist_core::User> {
                #author_expr
            }
        }
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Id,
    Author,
}

/// Finds the field marked with the role, falling back to conventional names.
fn find_field<'a>(
    fields: &'a syn::punctuated::Punctuated<syn::Field, syn::Token![,]>,
    role: Role,
    fallback_names: &[&str],
) -> Option<&'a syn::Field> {
    fields
        .iter()
        .find(|f| parse_field_roles(&f.attrs).contains(&role))
        .or_else(|| {
            fields.iter().find(|f| {
                f.ident
                    .as_ref()
                    .is_some_and(|ident| fallback_names.iter().any(|n| ident == n))
            })
        })
}

/// `self.field.as_ref()` for `Option` fields, `Some(&self.field)` otherwise.
fn field_access(field: &syn::Field) -> proc_macro2::TokenStream {
    let ident = &field.ident;
    if is_option(&field.ty) {
        quote! { self.#ident.as_ref() }
    } else {
        quote! { ::std::option::Option::Some(&self.#ident) }
    }
}

fn is_option(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

fn parse_field_roles(attrs: &[syn::Attribute]) -> Vec<Role> {
    let mut roles = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("chat") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                roles.push(Role::Id);
            } else if meta.path.is_ident("author") {
                roles.push(Role::Author);
            }
            Ok(())
        });
    }

    roles
}
