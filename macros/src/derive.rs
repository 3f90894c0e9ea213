//! Implementation of `#[derive(Inspect)]`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericParam, LitStr, Member, Type, parse_macro_input,
    parse_quote,
};

pub fn derive_inspect_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    match generate_code(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// One field that takes part in validation.
struct FieldInfo {
    /// How the field is accessed (`self.name` or `self.0`).
    member: Member,
    /// Name used in paths and sibling selectors.
    name: String,
    ty: Type,
    /// `(tag name, annotation)` pairs in declaration order.
    tags: Vec<(String, LitStr)>,
}

/// Options from `#[inspect(...)]`.
#[derive(Default)]
struct InspectOptions {
    skip: bool,
    rename: Option<String>,
}

fn parse_inspect_options(attrs: &[Attribute]) -> syn::Result<InspectOptions> {
    let mut options = InspectOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inspect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                options.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(options)
}

/// Collect `#[tag(name = "annotation", ...)]` pairs. Repeated attributes
/// accumulate.
fn parse_tags(attrs: &[Attribute]) -> syn::Result<Vec<(String, LitStr)>> {
    let mut tags = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            let name = meta
                .path
                .get_ident()
                .ok_or_else(|| meta.error("expected a tag name"))?
                .to_string();
            let annotation: LitStr = meta.value()?.parse()?;
            tags.push((name, annotation));
            Ok(())
        })?;
    }
    Ok(tags)
}

fn parse_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    let mut infos = Vec::new();
    for (position, field) in fields.iter().enumerate() {
        let options = parse_inspect_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let (member, default_name) = match &field.ident {
            Some(ident) => {
                let name = ident.to_string();
                let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
                (Member::Named(ident.clone()), name)
            }
            None => (Member::Unnamed(position.into()), position.to_string()),
        };
        infos.push(FieldInfo {
            member,
            name: options.rename.unwrap_or(default_name),
            ty: field.ty.clone(),
            tags: parse_tags(&field.attrs)?,
        });
    }
    Ok(infos)
}

/// Generate the `Inspect` and `Record` impls
fn generate_code(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => parse_fields(&data.fields)?,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Inspect can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Inspect can only be derived for structs",
            ));
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Inspect cannot be derived for types with lifetime parameters",
        ));
    }

    // Every type parameter must be inspectable and 'static (for TypeId).
    let type_params: Vec<_> = input
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => Some(param.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = input.generics.make_where_clause();
    for ident in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::fieldcheck_core::Inspect + 'static));
    }

    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let field_descriptors = fields.iter().map(|field| {
        let field_name = &field.name;
        let ty = &field.ty;
        let tags = field.tags.iter().map(|(tag, annotation)| quote! { (#tag, #annotation) });
        quote! {
            ::fieldcheck_core::FieldDescriptor::new(
                #field_name,
                &[#(#tags),*],
                <#ty as ::fieldcheck_core::Inspect>::record_descriptor,
            )
        }
    });
    let descriptor = quote! {
        ::fieldcheck_core::TypeDescriptor::new::<Self>(
            #type_name,
            ::std::vec![#(#field_descriptors),*],
        )
    };

    let field_arms = fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! {
            #index => ::fieldcheck_core::Inspect::inspect(&self.#member),
        }
    });

    Ok(quote! {
        impl #impl_generics ::fieldcheck_core::Inspect for #name #ty_generics #where_clause {
            fn inspect(&self) -> ::fieldcheck_core::Value<'_> {
                ::fieldcheck_core::Value::Record(self)
            }

            fn record_descriptor() -> ::core::option::Option<::fieldcheck_core::TypeDescriptor> {
                ::core::option::Option::Some(#descriptor)
            }
        }

        impl #impl_generics ::fieldcheck_core::Record for #name #ty_generics #where_clause {
            fn type_key(&self) -> ::core::any::TypeId {
                ::core::any::TypeId::of::<Self>()
            }

            fn descriptor(&self) -> ::fieldcheck_core::TypeDescriptor {
                #descriptor
            }

            fn field(&self, index: usize) -> ::fieldcheck_core::Value<'_> {
                match index {
                    #(#field_arms)*
                    _ => ::fieldcheck_core::Value::Nil,
                }
            }
        }
    })
}
