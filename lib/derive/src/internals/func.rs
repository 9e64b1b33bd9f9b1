use syn::{Error, FnArg, ReturnType, ForeignItem, Attribute, ItemFn, ItemImpl, ImplItem, Meta, ItemForeignMod, Item, Type, Visibility, Lifetime, Token, TypeReference, TypeBareFn, TypeImplTrait, ParenthesizedGenericArguments, PathSegment, parse_quote, parse_quote_spanned};
use syn::parse::{self, Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::visit_mut::{self, VisitMut};
use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, TokenStreamExt, format_ident};
use syn::Signature;
use syn::spanned::Spanned;
use itertools::Itertools;
use quote::{quote, quote_spanned};


const FUNC_ATTR_NAME: &str = "function_traits";

#[derive(Debug, Default)]
#[non_exhaustive]
pub struct FuncArgs {
    /// Override the name of the generated marker type
    pub name: Option<Ident>,
    /// Don't generate anything for this item
    ///
    /// Only meaningful for functions inside an `impl` or `extern` block.
    pub skip: bool,
}

impl Parse for FuncArgs {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        let mut args = FuncArgs::default();
        while !input.is_empty() {
            if input.peek(syn::Ident) {
                let ident = input.parse::<Ident>()?;
                match &*ident.to_string() {
                    "skip" => {
                        args.skip = true;
                    }
                    "name" => {
                        input.parse::<Token![=]>()?;
                        args.name = Some(input.parse::<Ident>()?);
                    }
                    _ => {
                        return Err(Error::new(ident.span(), format!("Invalid flag: {}", ident)))
                    }
                }
            } else {
                return Err(input.error("Unexpected token"))
            }
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(args)
    }
}

/// The ABIs we know how to name as function pointers
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FunctionAbi {
    Rust,
    C,
}

fn determine_abi(abi: Option<&syn::Abi>) -> Result<FunctionAbi, Error> {
    match abi {
        None => Ok(FunctionAbi::Rust),
        // `extern` alone means `extern "C"`
        Some(syn::Abi { name: None, .. }) => Ok(FunctionAbi::C),
        Some(syn::Abi { name: Some(ref name), .. }) => match &*name.value() {
            "C" => Ok(FunctionAbi::C),
            "Rust" => Ok(FunctionAbi::Rust),
            other => Err(Error::new(
                name.span(),
                format!("Unsupported ABI {:?}, expected \"Rust\" or \"C\"", other)
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ReceiverKind {
    /// `&self`
    Shared,
    /// `&mut self`
    Exclusive,
}

fn is_self_type(ty: &Type) -> bool {
    match *ty {
        Type::Path(ref path) => path.qself.is_none() && path.path.is_ident("Self"),
        _ => false,
    }
}

fn determine_receiver(receiver: &syn::Receiver) -> Result<ReceiverKind, Error> {
    let kind = |mutable: bool| if mutable { ReceiverKind::Exclusive } else { ReceiverKind::Shared };
    if let Some((_, ref lifetime)) = receiver.reference {
        if let Some(ref lifetime) = *lifetime {
            return Err(Error::new(lifetime.span(), "Explicit receiver lifetimes are not supported"));
        }
        return Ok(kind(receiver.mutability.is_some()));
    }
    if receiver.colon_token.is_some() {
        if let Type::Reference(ref reference) = *receiver.ty {
            if reference.lifetime.is_none() && is_self_type(&reference.elem) {
                return Ok(kind(reference.mutability.is_some()));
            }
        }
    }
    Err(Error::new(receiver.span(), "Only `&self` and `&mut self` receivers are supported"))
}

/// Remove our own attribute from a nested item, returning its arguments
fn take_nested_args(attrs: &mut Vec<Attribute>) -> Result<FuncArgs, Error> {
    let mut result = None;
    let mut kept = Vec::with_capacity(attrs.len());
    for attr in attrs.drain(..) {
        if attr.path().is_ident(FUNC_ATTR_NAME) {
            if result.is_some() {
                return Err(Error::new(attr.span(), format!("Conflicting #[{FUNC_ATTR_NAME}] attributes")));
            }
            result = Some(match attr.meta {
                Meta::Path(_) => FuncArgs::default(),
                _ => attr.parse_args::<FuncArgs>()?,
            });
        } else {
            kept.push(attr);
        }
    }
    *attrs = kept;
    Ok(result.unwrap_or_default())
}

/// Rejects lifetimes that can't be named from a trait impl.
///
/// Only `'static` is allowed, except inside nested fn pointers and
/// `Fn(..)` sugar which bring their own binders.
#[derive(Default)]
struct LifetimeCheck {
    error: Option<Error>,
}
impl LifetimeCheck {
    fn fail(&mut self, error: Error) {
        if let Some(ref mut existing) = self.error {
            existing.combine(error);
            return;
        }
        self.error = Some(error);
    }
    fn check(types: &[&Type]) -> Result<(), Error> {
        let mut check = LifetimeCheck::default();
        for ty in types {
            check.visit_type(ty);
        }
        match check.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
impl<'ast> Visit<'ast> for LifetimeCheck {
    fn visit_lifetime(&mut self, lifetime: &'ast Lifetime) {
        if lifetime.ident != "static" {
            self.fail(Error::new(
                lifetime.span(),
                "Only 'static lifetimes can appear in a reflected signature"
            ));
        }
    }
    fn visit_type_reference(&mut self, reference: &'ast TypeReference) {
        if reference.lifetime.is_none() {
            self.fail(Error::new(
                reference.span(),
                "Borrowed arguments need an explicit 'static lifetime"
            ));
        }
        visit::visit_type_reference(self, reference);
    }
    fn visit_type_impl_trait(&mut self, ty: &'ast TypeImplTrait) {
        self.fail(Error::new(ty.span(), "`impl Trait` has no single signature"));
    }
    fn visit_type_bare_fn(&mut self, _ty: &'ast TypeBareFn) {}
    fn visit_parenthesized_generic_arguments(&mut self, _args: &'ast ParenthesizedGenericArguments) {}
}

/// Replaces `Self` with the concrete type of an inherent impl
struct ReplaceSelf<'a> {
    self_ty: &'a Type,
}
impl VisitMut for ReplaceSelf<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(ref path) = *ty {
            let starts_with_self = path.qself.is_none()
                && path.path.leading_colon.is_none()
                && path.path.segments.first().map_or(false, |first| first.ident == "Self");
            if starts_with_self {
                let self_ty = self.self_ty;
                let rest: Punctuated<PathSegment, Token![::]> = path.path.segments.iter()
                    .skip(1)
                    .cloned()
                    .collect();
                *ty = if rest.is_empty() {
                    self_ty.clone()
                } else {
                    parse_quote!(<#self_ty>::#rest)
                };
                return;
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

struct SignatureContext<'a> {
    /// The type of the enclosing inherent impl (if any)
    self_ty: Option<&'a Type>,
    /// Force the ABI and safety of foreign functions
    foreign: bool,
}

fn emit_def_from_signature(
    sig: &Signature,
    vis: &Visibility,
    args: &FuncArgs,
    ctx: &SignatureContext,
) -> Result<StaticSignatureDef, Error> {
    if let Some(ref asyncness) = sig.asyncness {
        return Err(Error::new(asyncness.span(), "Async functions have no single signature"));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(Error::new(
            sig.generics.span(),
            format!("Generic functions have no single signature, consider #[{FUNC_ATTR_NAME}(skip)]")
        ));
    }
    if let Some(ref variadic) = sig.variadic {
        return Err(Error::new(variadic.span(), "C-variadic functions are not supported"));
    }
    let abi = if ctx.foreign {
        FunctionAbi::C
    } else {
        determine_abi(sig.abi.as_ref())?
    };
    let mut receiver = None;
    let mut argument_types = Vec::new();
    for input in &sig.inputs {
        match *input {
            FnArg::Receiver(ref item) => {
                let self_ty = match ctx.self_ty {
                    Some(self_ty) => self_ty.clone(),
                    None => return Err(Error::new(item.span(), "Invalid input")),
                };
                receiver = Some((determine_receiver(item)?, self_ty));
            },
            FnArg::Typed(ref item) => {
                argument_types.push((*item.ty).clone());
            },
        }
    }
    let mut return_type = match sig.output {
        ReturnType::Default => parse_quote!(()),
        ReturnType::Type(_, ref ty) => (**ty).clone(),
    };
    if let Some(self_ty) = ctx.self_ty {
        let mut replace = ReplaceSelf { self_ty };
        for ty in &mut argument_types {
            replace.visit_type_mut(ty);
        }
        replace.visit_type_mut(&mut return_type);
    }
    LifetimeCheck::check(&argument_types.iter()
        .chain(std::iter::once(&return_type))
        .collect_vec())?;

    let name = sig.ident.clone();
    let (marker, display_name, pointer) = match ctx.self_ty {
        Some(self_ty) => {
            let type_name = match *self_ty {
                Type::Path(ref path) if path.qself.is_none() => {
                    match path.path.segments.last() {
                        Some(last) => last.ident.clone(),
                        None => return Err(Error::new(self_ty.span(), "Invalid impl target")),
                    }
                },
                _ => return Err(Error::new(self_ty.span(), "Expected a named type for the impl")),
            };
            (
                format_ident!("_FN_{}_{}", type_name, name),
                format!("{}::{}", type_name, name),
                quote!(<#self_ty>::#name),
            )
        },
        None => (format_ident!("_FN_{}", name), name.to_string(), quote!(#name)),
    };
    Ok(StaticSignatureDef {
        display_name,
        marker: args.name.clone().unwrap_or(marker),
        vis: vis.clone(),
        is_unsafe: ctx.foreign || sig.unsafety.is_some(),
        abi,
        receiver,
        argument_types,
        return_type,
        pointer,
    })
}

pub fn handle_item(item: &Item, args: FuncArgs) -> Result<TokenStream, syn::Error> {
    match *item {
        Item::Fn(ref func) => handle_fn_def(func, args),
        Item::Impl(ref item_impl) => handle_impl(item_impl, args),
        Item::ForeignMod(ref foreign_mod) => handle_foreign_mod(foreign_mod, args),
        _ => {
            Err(Error::new(
                item.span(),
                format!("Invalid target for #[{}]", FUNC_ATTR_NAME)
            ))
        }
    }
}

fn reject_block_args(args: &FuncArgs, span: proc_macro2::Span) -> Result<(), Error> {
    if args.skip || args.name.is_some() {
        return Err(Error::new(
            span,
            "`skip` and `name` must be given on the individual functions of a block"
        ));
    }
    Ok(())
}

fn handle_fn_def(item: &ItemFn, args: FuncArgs) -> Result<TokenStream, syn::Error> {
    if args.skip {
        return Err(Error::new(item.sig.ident.span(), "`skip` is only valid inside a block"));
    }
    let def = emit_def_from_signature(&item.sig, &item.vis, &args, &SignatureContext {
        self_ty: None,
        foreign: false,
    })?;
    Ok(quote! {
        #item
        #def
    })
}

fn handle_impl(item: &ItemImpl, args: FuncArgs) -> Result<TokenStream, syn::Error> {
    reject_block_args(&args, item.impl_token.span)?;
    if let Some((_, ref path, _)) = item.trait_ {
        return Err(Error::new(path.span(), "Only inherent impls are supported"));
    }
    if !item.generics.params.is_empty() {
        return Err(Error::new(item.generics.span(), "Generic impls have no single signature"));
    }
    let mut result_item = item.clone();
    let mut defs = Vec::new();
    for impl_item in &mut result_item.items {
        if let ImplItem::Fn(ref mut method) = *impl_item {
            let args = take_nested_args(&mut method.attrs)?;
            if args.skip {
                continue;
            }
            defs.push(emit_def_from_signature(&method.sig, &method.vis, &args, &SignatureContext {
                self_ty: Some(&item.self_ty),
                foreign: false,
            })?);
        }
    }
    Ok(quote! {
        #result_item
        #(#defs)*
    })
}

fn handle_foreign_mod(item: &ItemForeignMod, args: FuncArgs) -> Result<TokenStream, syn::Error> {
    reject_block_args(&args, item.abi.span())?;
    match item.abi.name.as_ref() {
        Some(abi_name) if &*abi_name.value() == "C" => {},
        None => {},
        _ => {
            return Err(Error::new(item.abi.span(), "Expected C ABI"))
        }
    }
    let mut result_item = item.clone();
    let mut defs = Vec::new();
    for foreign_item in &mut result_item.items {
        if let ForeignItem::Fn(ref mut func) = *foreign_item {
            let args = take_nested_args(&mut func.attrs)?;
            if args.skip {
                continue;
            }
            // All foreign functions are unsafe (in spite of lack of keyword)
            defs.push(emit_def_from_signature(&func.sig, &func.vis, &args, &SignatureContext {
                self_ty: None,
                foreign: true,
            })?);
        }
    }
    Ok(quote! {
        #result_item
        #(#defs)*
    })
}

// Emit
#[derive(Clone, Debug)]
struct StaticSignatureDef {
    display_name: String,
    marker: Ident,
    vis: Visibility,
    is_unsafe: bool,
    abi: FunctionAbi,
    receiver: Option<(ReceiverKind, Type)>,
    argument_types: Vec<Type>,
    return_type: Type,
    /// An expression naming the function
    pointer: TokenStream,
}
impl StaticSignatureDef {
    /// The function pointer type, including the receiver
    fn pointer_type(&self) -> TokenStream {
        let unsafety = if self.is_unsafe { Some(quote!(unsafe)) } else { None };
        let abi = match self.abi {
            FunctionAbi::Rust => None,
            FunctionAbi::C => Some(quote!(extern "C")),
        };
        let receiver = self.receiver.as_ref().map(|(kind, object)| match *kind {
            ReceiverKind::Shared => quote!(&#object,),
            ReceiverKind::Exclusive => quote!(&mut #object,),
        });
        let argument_types = &self.argument_types;
        let return_type = &self.return_type;
        quote!(#unsafety #abi fn(#receiver #(#argument_types),*) -> #return_type)
    }
    /// The type that has the actual `FunctionTraits` implementation
    fn target_type(&self) -> TokenStream {
        let pointer_type = self.pointer_type();
        if self.receiver.is_some() {
            quote!(::static_fn_traits::Method<#pointer_type>)
        } else {
            pointer_type
        }
    }
    /// One function pointer type per argument (and one for the return type),
    /// spanned at the original type.
    ///
    /// Lifetimes hidden inside paths (`Cow<str>`) can't be seen syntactically,
    /// so the compiler checks each type on its own to report them at the argument.
    fn nameable_checks(&self) -> Vec<Type> {
        let return_type = &self.return_type;
        self.argument_types.iter()
            .map(|ty| parse_quote_spanned!(ty.span()=> fn(#ty)))
            .chain(std::iter::once(parse_quote_spanned!(return_type.span()=> fn() -> #return_type)))
            .collect_vec()
    }
    fn pointer_value(&self) -> TokenStream {
        let pointer = &self.pointer;
        if self.receiver.is_some() {
            let pointer_type = self.pointer_type();
            quote!(::static_fn_traits::Method::<#pointer_type>(#pointer))
        } else {
            quote!(#pointer)
        }
    }
}

impl ToTokens for StaticSignatureDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let StaticSignatureDef {
            ref display_name,
            ref marker,
            ref vis,
            ..
        } = *self;
        let target = self.target_type();
        let pointer = self.pointer_value();
        let doc = format!("Signature information for `{}`", display_name);
        let method_traits = self.receiver.as_ref().map(|_| quote! {
            impl ::static_fn_traits::MethodTraits for #marker {
                type Object = <#target as ::static_fn_traits::MethodTraits>::Object;
                const IS_CONST: bool = <#target as ::static_fn_traits::MethodTraits>::IS_CONST;
            }
        });
        let checks = self.nameable_checks().into_iter().map(|check| {
            quote_spanned!(check.span()=> assert_nameable::<#check>();)
        });
        tokens.append_all(quote! {
            const _: () = {
                fn assert_nameable<T: ::static_fn_traits::FunctionTraits>() {}
                #[allow(dead_code)]
                fn check_signature() {
                    #(#checks)*
                }
            };
            #[doc = #doc]
            #[allow(non_camel_case_types, dead_code)]
            #vis enum #marker {}
            #[allow(dead_code)]
            impl #marker {
                /// A pointer to the function
                #vis const POINTER: #target = #pointer;
            }
            impl ::static_fn_traits::FunctionTraits for #marker {
                type Output = <#target as ::static_fn_traits::FunctionTraits>::Output;
                type Arguments = <#target as ::static_fn_traits::FunctionTraits>::Arguments;
                type FunctionPtr = <#target as ::static_fn_traits::FunctionTraits>::FunctionPtr;
                const SHAPE: ::static_fn_traits::Shape =
                    <#target as ::static_fn_traits::FunctionTraits>::SHAPE;
                const ARGUMENTS_COUNT: usize =
                    <#target as ::static_fn_traits::FunctionTraits>::ARGUMENTS_COUNT;
                const IS_NOTHROW: bool =
                    <#target as ::static_fn_traits::FunctionTraits>::IS_NOTHROW;
                const IS_UNSAFE: bool =
                    <#target as ::static_fn_traits::FunctionTraits>::IS_UNSAFE;
                const CALLING_CONVENTION: ::static_fn_traits::CallingConvention =
                    <#target as ::static_fn_traits::FunctionTraits>::CALLING_CONVENTION;
            }
            #method_traits
        });
    }
}
