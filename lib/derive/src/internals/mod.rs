use self::func::FuncArgs;
use proc_macro2::TokenStream;
use syn::Item;

pub mod func;
mod utils;

pub fn derive_function_traits(args: FuncArgs, input: &Item) -> Result<TokenStream, syn::Error> {
    let result = self::func::handle_item(input, args)?;

    self::utils::debug_proc_macro("function_traits", &self::utils::item_name(input), &result);

    Ok(result)
}
